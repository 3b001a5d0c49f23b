//! Iterated-map engine over a dense state history.

use orrery_core::{guard_capacity, ConfigError, Params, StepEngine, StepError};

/// Construction parameters for [`DifferenceEngine`].
#[derive(Clone, Copy, Debug)]
pub struct DifferenceConfig {
    /// History capacity (number of snapshots, including snapshot 0).
    pub max_step: usize,
    /// Number of state variables per snapshot.
    pub dim: usize,
}

impl DifferenceConfig {
    /// Check the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a zero
    /// `max_step` or `dim`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_step == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_step",
                reason: "must be positive, got 0".into(),
            });
        }
        if self.dim == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "dim",
                reason: "must be positive, got 0".into(),
            });
        }
        Ok(())
    }

    /// Read `max_step` and `dim` from a parameter map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when either entry is missing or not a
    /// positive integer.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        Ok(Self {
            max_step: params.count("max_step")?,
            dim: params.count("dim")?,
        })
    }
}

/// A state-to-state map applied by [`DifferenceEngine::update`].
///
/// Blanket-implemented for closures `Fn(&[f64], &mut [f64])` reading
/// the current state and writing the next.
pub trait MapRule {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str {
        "custom"
    }

    /// Write `f(x)` into `next`. Both slices have the engine's `dim`.
    fn apply(&self, x: &[f64], next: &mut [f64]);
}

/// The named default map: `x[n+1] = x[n]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl MapRule for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, x: &[f64], next: &mut [f64]) {
        next.copy_from_slice(x);
    }
}

impl<F> MapRule for F
where
    F: Fn(&[f64], &mut [f64]),
{
    fn apply(&self, x: &[f64], next: &mut [f64]) {
        self(x, next);
    }
}

/// Difference-equation engine: hosts iterated maps with no numeric
/// integration semantics beyond direct application of the map.
///
/// # Examples
///
/// ```
/// use orrery_core::StepEngine;
/// use orrery_engines::{DifferenceConfig, DifferenceEngine};
///
/// // Logistic map, r = 2.5.
/// let mut engine = DifferenceEngine::new(DifferenceConfig {
///     max_step: 50,
///     dim: 1,
/// })
/// .unwrap();
/// engine.initialize(&[0.1]).unwrap();
/// let logistic = |x: &[f64], next: &mut [f64]| {
///     next[0] = 2.5 * x[0] * (1.0 - x[0]);
/// };
/// engine.simulate(None, &logistic).unwrap();
/// assert_eq!(engine.step(), 49);
/// ```
pub struct DifferenceEngine {
    max_step: usize,
    dim: usize,
    step: usize,
    history: Vec<f64>,
}

impl DifferenceEngine {
    /// Preallocate the full `max_step × dim` history.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config fails validation.
    pub fn new(config: DifferenceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_step: config.max_step,
            dim: config.dim,
            step: 0,
            history: vec![0.0; config.max_step * config.dim],
        })
    }

    /// Number of state variables per snapshot.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Initialize from the zero vector (the default initial state).
    pub fn initialize_zero(&mut self) {
        self.history[..self.dim].fill(0.0);
        self.step = 0;
    }

    fn row(&self, step: usize) -> &[f64] {
        let offset = step * self.dim;
        &self.history[offset..offset + self.dim]
    }
}

impl StepEngine for DifferenceEngine {
    type Init = [f64];
    type Update = dyn MapRule;
    type Snapshot<'a> = &'a [f64];

    fn max_step(&self) -> usize {
        self.max_step
    }

    fn step(&self) -> usize {
        self.step
    }

    fn initialize(&mut self, x0: &[f64]) -> Result<(), StepError> {
        if x0.len() != self.dim {
            return Err(StepError::DimensionMismatch {
                expected: self.dim,
                got: x0.len(),
            });
        }
        self.history[..self.dim].copy_from_slice(x0);
        self.step = 0;
        Ok(())
    }

    fn update(&mut self, rule: &dyn MapRule) -> Result<(), StepError> {
        guard_capacity(self.step, self.max_step)?;
        let offset = self.step * self.dim;
        let (head, tail) = self.history.split_at_mut(offset + self.dim);
        let current = &head[offset..];
        let next = &mut tail[..self.dim];
        rule.apply(current, next);
        self.step += 1;
        Ok(())
    }

    fn snapshot(&self, step: usize) -> Result<&[f64], StepError> {
        if step > self.step {
            return Err(StepError::SnapshotOutOfRange {
                requested: step,
                recorded: self.step,
            });
        }
        Ok(self.row(step))
    }
}
