//! Explicit-Euler ODE engine with a parallel time axis.

use orrery_core::{guard_capacity, ConfigError, Params, RuleError, StepEngine, StepError};

/// Construction parameters for [`OdeEngine`].
#[derive(Clone, Copy, Debug)]
pub struct OdeConfig {
    /// History capacity (number of snapshots, including snapshot 0).
    pub max_step: usize,
    /// Number of state variables per snapshot.
    pub dim: usize,
    /// Time step, fixed at construction. Must be positive and finite.
    pub dt: f64,
}

impl OdeConfig {
    /// Check the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a zero
    /// `max_step`/`dim` or a non-positive or non-finite `dt`.
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
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "dt",
                reason: format!("must be positive and finite, got {}", self.dt),
            });
        }
        Ok(())
    }

    /// Read `max_step`, `dim`, and `dt` from a parameter map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an entry is missing or out of
    /// range.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        Ok(Self {
            max_step: params.count("max_step")?,
            dim: params.count("dim")?,
            dt: params.positive("dt")?,
        })
    }
}

/// A derivative function `dx/dt = f(x)` evaluated by
/// [`OdeEngine::update`].
///
/// Blanket-implemented for closures `Fn(&[f64], &mut [f64])` that
/// cannot fail.
pub trait VectorField {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str {
        "custom"
    }

    /// Write `f(x)` into `dxdt`. Both slices have the engine's `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::ExecutionFailed`] when the field cannot be
    /// evaluated for the supplied state (e.g. wrong dimensionality).
    fn eval(&self, x: &[f64], dxdt: &mut [f64]) -> Result<(), RuleError>;
}

impl<F> VectorField for F
where
    F: Fn(&[f64], &mut [f64]),
{
    fn eval(&self, x: &[f64], dxdt: &mut [f64]) -> Result<(), RuleError> {
        self(x, dxdt);
        Ok(())
    }
}

/// The Lotka–Volterra predator–prey equations over a 2D state
/// `(x, y)`:
///
/// ```text
/// dx/dt = a·x − b·x·y
/// dy/dt = d·x·y − c·y
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LotkaVolterra {
    /// Prey growth rate.
    pub a: f64,
    /// Predation rate.
    pub b: f64,
    /// Predator death rate.
    pub c: f64,
    /// Predator reproduction rate.
    pub d: f64,
}

impl VectorField for LotkaVolterra {
    fn name(&self) -> &str {
        "lotka_volterra"
    }

    fn eval(&self, x: &[f64], dxdt: &mut [f64]) -> Result<(), RuleError> {
        if x.len() != 2 {
            return Err(RuleError::ExecutionFailed {
                reason: format!("requires a 2-dimensional state, got {}", x.len()),
            });
        }
        let (prey, predator) = (x[0], x[1]);
        dxdt[0] = self.a * prey - self.b * prey * predator;
        dxdt[1] = self.d * prey * predator - self.c * predator;
        Ok(())
    }
}

/// One recorded ODE snapshot: the state vector and its time stamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdeSnapshot<'a> {
    /// Simulated time at this step (`step * dt`).
    pub time: f64,
    /// The state vector at this step.
    pub state: &'a [f64],
}

/// Forward-Euler continuous-time integrator.
///
/// Advances `x[n+1] = x[n] + f(x[n])·dt` and the time axis
/// `t[n+1] = t[n] + dt`. First-order accurate and unstable for large
/// `dt` relative to the system's stiffness — that tradeoff (simplicity
/// over accuracy) is part of the engine's contract, not a defect.
///
/// # Examples
///
/// ```
/// use orrery_core::StepEngine;
/// use orrery_engines::{LotkaVolterra, OdeConfig, OdeEngine};
///
/// let mut engine = OdeEngine::new(OdeConfig {
///     max_step: 1000,
///     dim: 2,
///     dt: 0.01,
/// })
/// .unwrap();
/// engine.initialize(&[10.0, 10.0]).unwrap();
/// let field = LotkaVolterra {
///     a: 1.1,
///     b: 0.4,
///     c: 0.4,
///     d: 0.1,
/// };
/// engine.simulate(None, &field).unwrap();
/// assert_eq!(engine.step(), 999);
/// ```
pub struct OdeEngine {
    max_step: usize,
    dim: usize,
    dt: f64,
    step: usize,
    history: Vec<f64>,
    time: Vec<f64>,
    scratch: Vec<f64>,
}

impl OdeEngine {
    /// Preallocate the `max_step × dim` history and the time axis.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config fails validation.
    pub fn new(config: OdeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_step: config.max_step,
            dim: config.dim,
            dt: config.dt,
            step: 0,
            history: vec![0.0; config.max_step * config.dim],
            time: vec![0.0; config.max_step],
            scratch: vec![0.0; config.dim],
        })
    }

    /// Number of state variables per snapshot.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The fixed integration time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The recorded time axis, `[0, dt, 2·dt, ..., step·dt]`.
    pub fn times(&self) -> &[f64] {
        &self.time[..=self.step]
    }

    /// Initialize from the zero vector (the default initial state).
    pub fn initialize_zero(&mut self) {
        self.history[..self.dim].fill(0.0);
        self.time[0] = 0.0;
        self.step = 0;
    }

    fn row(&self, step: usize) -> &[f64] {
        let offset = step * self.dim;
        &self.history[offset..offset + self.dim]
    }
}

impl StepEngine for OdeEngine {
    type Init = [f64];
    type Update = dyn VectorField;
    type Snapshot<'a> = OdeSnapshot<'a>;

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
        self.time[0] = 0.0;
        self.step = 0;
        Ok(())
    }

    fn update(&mut self, field: &dyn VectorField) -> Result<(), StepError> {
        guard_capacity(self.step, self.max_step)?;
        let offset = self.step * self.dim;

        // Evaluate into scratch first: a failing field must leave the
        // history untouched.
        let current = &self.history[offset..offset + self.dim];
        field
            .eval(current, &mut self.scratch)
            .map_err(|reason| StepError::RuleFailed {
                name: field.name().into(),
                reason,
            })?;

        let (head, tail) = self.history.split_at_mut(offset + self.dim);
        let current = &head[offset..];
        let next = &mut tail[..self.dim];
        for ((next, x), dxdt) in next.iter_mut().zip(current).zip(&self.scratch) {
            *next = x + dxdt * self.dt;
        }
        self.time[self.step + 1] = self.time[self.step] + self.dt;
        self.step += 1;
        Ok(())
    }

    fn snapshot(&self, step: usize) -> Result<OdeSnapshot<'_>, StepError> {
        if step > self.step {
            return Err(StepError::SnapshotOutOfRange {
                requested: step,
                recorded: self.step,
            });
        }
        Ok(OdeSnapshot {
            time: self.time[step],
            state: self.row(step),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(max_step: usize, dim: usize, dt: f64) -> OdeEngine {
        OdeEngine::new(OdeConfig { max_step, dim, dt }).unwrap()
    }

    #[test]
    fn new_rejects_bad_dt() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            assert!(OdeEngine::new(OdeConfig {
                max_step: 10,
                dim: 2,
                dt,
            })
            .is_err());
        }
    }

    #[test]
    fn initialize_wrong_length_is_dimension_mismatch() {
        let mut e = engine(10, 2, 0.01);
        assert_eq!(
            e.initialize(&[1.0]),
            Err(StepError::DimensionMismatch {
                expected: 2,
                got: 1,
            })
        );
    }

    #[test]
    fn lotka_volterra_single_step_exact() {
        // Demo parameters: a=1.1, b=0.4, c=0.4, d=0.1, dt=0.01, x0=(10,10).
        let mut e = engine(10, 2, 0.01);
        e.initialize(&[10.0, 10.0]).unwrap();
        let field = LotkaVolterra {
            a: 1.1,
            b: 0.4,
            c: 0.4,
            d: 0.1,
        };
        e.update(&field).unwrap();

        let dx = 1.1 * 10.0 - 0.4 * 10.0 * 10.0;
        let dy = 0.1 * 10.0 * 10.0 - 0.4 * 10.0;
        let snap = e.snapshot(1).unwrap();
        assert_eq!(snap.state[0], 10.0 + dx * 0.01);
        assert_eq!(snap.state[1], 10.0 + dy * 0.01);
        assert_eq!(snap.time, 0.01);
    }

    #[test]
    fn time_axis_accumulates_dt() {
        let mut e = engine(5, 1, 0.25);
        e.initialize(&[0.0]).unwrap();
        e.simulate(None, &|_: &[f64], dxdt: &mut [f64]| dxdt[0] = 1.0)
            .unwrap();
        assert_eq!(e.times(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        // Constant unit derivative: x tracks t exactly.
        for step in 0..=e.step() {
            let snap = e.snapshot(step).unwrap();
            assert_eq!(snap.state[0], snap.time);
        }
    }

    #[test]
    fn lotka_volterra_rejects_wrong_dim() {
        let mut e = engine(10, 3, 0.01);
        e.initialize(&[1.0, 1.0, 1.0]).unwrap();
        let field = LotkaVolterra {
            a: 1.0,
            b: 1.0,
            c: 1.0,
            d: 1.0,
        };
        let err = e.update(&field).unwrap_err();
        assert!(matches!(
            err,
            StepError::RuleFailed { ref name, .. } if name == "lotka_volterra"
        ));
        // Failed update must not advance the counter.
        assert_eq!(e.step(), 0);
    }

    #[test]
    fn from_params_validates_dt() {
        let p = Params::new()
            .with("max_step", 100.0)
            .with("dim", 2.0)
            .with("dt", 0.0);
        assert!(OdeConfig::from_params(&p).is_err());
    }
}
