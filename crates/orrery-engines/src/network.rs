//! Coupled-oscillator engine on a fixed graph topology.

use std::sync::Arc;

use orrery_core::{guard_capacity, ConfigError, Params, StepEngine, StepError};
use orrery_graph::{GraphProvider, Topology};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Construction parameters for [`NetworkEngine`].
#[derive(Clone, Copy, Debug)]
pub struct NetworkConfig {
    /// History capacity (number of snapshots, including snapshot 0).
    pub max_step: usize,
    /// RNG seed for the random initial node states.
    pub seed: u64,
}

impl NetworkConfig {
    /// Check the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a zero
    /// `max_step`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_step == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_step",
                reason: "must be positive, got 0".into(),
            });
        }
        Ok(())
    }

    /// Read the config from a parameter map. `seed` defaults to 42
    /// when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `max_step` is missing or out of
    /// range.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let seed = match params.get("seed") {
            Some(_) => params.unsigned("seed")?,
            None => 42,
        };
        Ok(Self {
            max_step: params.count("max_step")?,
            seed,
        })
    }
}

/// Per-step parameters for the linear diffusive coupling
///
/// ```text
/// dθ_i/dt = b·θ_i + a·Σ_{j ∈ N(i)} (θ_j − θ_i)
/// ```
///
/// discretized with explicit Euler. The system synchronizes when
/// `b − a·λ₂ < 0`, where `λ₂` is the algebraic connectivity of the
/// topology; the engine performs no stability check, so an unstable
/// choice silently diverges.
#[derive(Debug, Clone, Copy)]
pub struct LinearCoupling {
    a: f64,
    b: f64,
    dt: f64,
}

impl LinearCoupling {
    /// Build a coupling parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] when `a` or `b` is
    /// not finite, or `dt` is not positive and finite.
    pub fn new(a: f64, b: f64, dt: f64) -> Result<Self, ConfigError> {
        if !a.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "a",
                reason: format!("must be finite, got {a}"),
            });
        }
        if !b.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "b",
                reason: format!("must be finite, got {b}"),
            });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "dt",
                reason: format!("must be positive and finite, got {dt}"),
            });
        }
        Ok(Self { a, b, dt })
    }

    /// Coupling strength.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Self-excitation rate.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// One recorded network snapshot: the shared topology plus the node
/// states at that step.
///
/// The topology is the same `Arc` for every snapshot of a run — only
/// the state array differs — and each state row is written exactly
/// once, so snapshots never alias each other.
#[derive(Debug, Clone, Copy)]
pub struct NetworkSnapshot<'a> {
    topology: &'a Arc<Topology>,
    states: &'a [f64],
}

impl<'a> NetworkSnapshot<'a> {
    /// The (run-invariant) graph topology.
    pub fn topology(&self) -> &'a Arc<Topology> {
        self.topology
    }

    /// All node states at this step, indexed by node.
    pub fn states(&self) -> &'a [f64] {
        self.states
    }

    /// The scalar state of one node.
    pub fn state(&self, node: usize) -> f64 {
        self.states[node]
    }
}

/// Linearly coupled dynamical nodes on a fixed graph.
///
/// The topology comes from a [`GraphProvider`] once, at construction;
/// every snapshot shares it. Each `update` reads the entire previous
/// state row (synchronous update, like the automata) and writes the
/// next one.
///
/// # Examples
///
/// ```
/// use orrery_core::StepEngine;
/// use orrery_engines::{LinearCoupling, NetworkConfig, NetworkEngine};
/// use orrery_graph::KarateClub;
///
/// let mut engine = NetworkEngine::new(
///     NetworkConfig {
///         max_step: 2000,
///         seed: 42,
///     },
///     &KarateClub,
/// )
/// .unwrap();
/// engine.initialize(&()).unwrap();
/// // λ₂ ≈ 0.4685 for the karate club, so b − a·λ₂ < 0: synchronizes.
/// let coupling = LinearCoupling::new(2.0, 0.9, 0.01).unwrap();
/// engine.simulate(None, &coupling).unwrap();
/// assert_eq!(engine.step(), 1999);
/// ```
pub struct NetworkEngine {
    max_step: usize,
    seed: u64,
    step: usize,
    topology: Arc<Topology>,
    states: Vec<f64>,
}

impl NetworkEngine {
    /// Obtain the topology from `provider` and preallocate the full
    /// `max_step × node_count` state history.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config fails validation or
    /// the provider's graph is inconsistent.
    pub fn new(config: NetworkConfig, provider: &dyn GraphProvider) -> Result<Self, ConfigError> {
        config.validate()?;
        let topology = provider
            .build()
            .map_err(|e| ConfigError::InvalidParameter {
                name: "graph",
                reason: format!("provider '{}': {e}", provider.name()),
            })?;
        let nodes = topology.node_count();
        Ok(Self {
            max_step: config.max_step,
            seed: config.seed,
            step: 0,
            topology: Arc::new(topology),
            states: vec![0.0; config.max_step * nodes],
        })
    }

    /// The shared graph topology.
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Number of nodes per snapshot.
    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    fn row(&self, step: usize) -> &[f64] {
        let nodes = self.node_count();
        let offset = step * nodes;
        &self.states[offset..offset + nodes]
    }
}

impl StepEngine for NetworkEngine {
    type Init = ();
    type Update = LinearCoupling;
    type Snapshot<'a> = NetworkSnapshot<'a>;

    fn max_step(&self) -> usize {
        self.max_step
    }

    fn step(&self) -> usize {
        self.step
    }

    fn initialize(&mut self, _init: &()) -> Result<(), StepError> {
        let nodes = self.node_count();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        for state in &mut self.states[..nodes] {
            *state = rng.gen::<f64>();
        }
        self.step = 0;
        Ok(())
    }

    fn update(&mut self, coupling: &LinearCoupling) -> Result<(), StepError> {
        guard_capacity(self.step, self.max_step)?;
        let nodes = self.node_count();
        let offset = self.step * nodes;
        let (head, tail) = self.states.split_at_mut(offset + nodes);
        let current = &head[offset..];
        let next = &mut tail[..nodes];
        for i in self.topology.nodes() {
            let theta = current[i];
            let spread: f64 = self
                .topology
                .neighbours(i)
                .iter()
                .map(|&j| current[j] - theta)
                .sum();
            next[i] = theta + (coupling.b * theta + coupling.a * spread) * coupling.dt;
        }
        self.step += 1;
        Ok(())
    }

    fn snapshot(&self, step: usize) -> Result<NetworkSnapshot<'_>, StepError> {
        if step > self.step {
            return Err(StepError::SnapshotOutOfRange {
                requested: step,
                recorded: self.step,
            });
        }
        Ok(NetworkSnapshot {
            topology: &self.topology,
            states: self.row(step),
        })
    }
}
