//! Synchronous binary cellular automata on periodic lattices.

use orrery_core::{guard_capacity, ConfigError, Params, RuleError, StepEngine, StepError};
use orrery_space::{Lattice, Ring1D, Torus2D};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Construction parameters for [`CellAutomatonEngine`].
#[derive(Clone, Copy, Debug)]
pub struct AutomatonConfig {
    /// History capacity (number of snapshots, including snapshot 0).
    pub max_step: usize,
    /// Number of cells along x (columns).
    pub size_x: usize,
    /// Number of cells along y (rows). `1` selects a 1D ring.
    pub size_y: usize,
    /// RNG seed for the random initial configuration.
    pub seed: u64,
}

impl AutomatonConfig {
    /// Check the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a zero `max_step`
    /// or grid extent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_step == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_step",
                reason: "must be positive, got 0".into(),
            });
        }
        if self.size_x == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "size_x",
                reason: "must be positive, got 0".into(),
            });
        }
        if self.size_y == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "size_y",
                reason: "must be positive, got 0".into(),
            });
        }
        Ok(())
    }

    /// Read the config from a parameter map. `size_y` defaults to 1
    /// (1D ring) and `seed` to 42 when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an entry is missing or out of
    /// range.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        let size_y = match params.get("size_y") {
            Some(_) => params.count("size_y")?,
            None => 1,
        };
        let seed = match params.get("seed") {
            Some(_) => params.unsigned("seed")?,
            None => 42,
        };
        Ok(Self {
            max_step: params.count("max_step")?,
            size_x: params.count("size_x")?,
            size_y,
            seed,
        })
    }
}

/// A synchronous full-grid transition applied by
/// [`CellAutomatonEngine::update`].
///
/// The next grid is computed entirely from the frozen current grid:
/// `apply` reads `current` and fills `next`, and must never treat its
/// own writes as inputs.
pub trait TransitionRule {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Fill `next` from `current`. Both slices cover the whole
    /// lattice in row-major order; cell values are 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::ExecutionFailed`] when the rule does not
    /// support the supplied lattice.
    fn apply(&self, lattice: &Lattice, current: &[u8], next: &mut [u8])
        -> Result<(), RuleError>;
}

/// Elementary rule 184, the 1D "traffic" rule.
///
/// The next cell is 1 iff the periodic 3-cell neighbourhood
/// `(left, self, right)` is one of `(1,1,1)`, `(1,0,1)`, `(1,0,0)`,
/// `(0,1,1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rule184;

impl Rule184 {
    fn next_cell(left: u8, centre: u8, right: u8) -> u8 {
        matches!(
            (left, centre, right),
            (1, 1, 1) | (1, 0, 1) | (1, 0, 0) | (0, 1, 1)
        ) as u8
    }
}

impl TransitionRule for Rule184 {
    fn name(&self) -> &str {
        "rule184"
    }

    fn apply(
        &self,
        lattice: &Lattice,
        current: &[u8],
        next: &mut [u8],
    ) -> Result<(), RuleError> {
        let ring = match lattice {
            Lattice::Ring(ring) => ring,
            Lattice::Torus(_) => {
                return Err(RuleError::ExecutionFailed {
                    reason: "requires a 1D lattice".into(),
                })
            }
        };
        for x in 0..ring.len() {
            let i = x as isize;
            let left = current[ring.wrap(i - 1)];
            let right = current[ring.wrap(i + 1)];
            next[x] = Self::next_cell(left, current[x], right);
        }
        Ok(())
    }
}

/// Conway's Game of Life on a 2D torus.
///
/// Uses the self-excluded 8-neighbour count `n`: a dead cell is born
/// when `n == 3`, a live cell survives when `n` is 2 or 3. This is
/// the canonical convention; the equivalent 9-cell inclusive
/// convolution formulation (live cell kept when the inclusive count
/// is 3 or 4) produces identical transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameOfLife;

impl TransitionRule for GameOfLife {
    fn name(&self) -> &str {
        "game_of_life"
    }

    fn apply(
        &self,
        lattice: &Lattice,
        current: &[u8],
        next: &mut [u8],
    ) -> Result<(), RuleError> {
        let torus = match lattice {
            Lattice::Torus(torus) => torus,
            Lattice::Ring(_) => {
                return Err(RuleError::ExecutionFailed {
                    reason: "requires a 2D lattice".into(),
                })
            }
        };
        for row in 0..torus.rows() {
            for col in 0..torus.cols() {
                let i = torus.index(row, col);
                let alive: u32 = torus
                    .moore(row, col)
                    .iter()
                    .map(|&j| u32::from(current[j]))
                    .sum();
                next[i] = match (current[i], alive) {
                    (0, 3) => 1,
                    (1, 2) | (1, 3) => 1,
                    _ => 0,
                };
            }
        }
        Ok(())
    }
}

/// Synchronous binary cellular automaton on a periodic lattice.
///
/// `size_y == 1` gives a 1D ring (rule applied per 3-cell
/// neighbourhood); larger `size_y` gives a 2D torus (rule applied to
/// the whole grid with wrap-around 8-neighbour adjacency).
///
/// # Examples
///
/// ```
/// use orrery_core::StepEngine;
/// use orrery_engines::{AutomatonConfig, CellAutomatonEngine, GameOfLife};
///
/// let mut engine = CellAutomatonEngine::new(AutomatonConfig {
///     max_step: 10,
///     size_x: 16,
///     size_y: 16,
///     seed: 42,
/// })
/// .unwrap();
/// engine.initialize(&()).unwrap();
/// engine.simulate(None, &GameOfLife).unwrap();
/// assert_eq!(engine.step(), 9);
/// ```
pub struct CellAutomatonEngine {
    max_step: usize,
    lattice: Lattice,
    seed: u64,
    step: usize,
    cells: usize,
    history: Vec<u8>,
}

impl CellAutomatonEngine {
    /// Preallocate the full `max_step × cells` history.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config fails validation.
    pub fn new(config: AutomatonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lattice = if config.size_y == 1 {
            Lattice::Ring(Ring1D::new(config.size_x).map_err(|e| {
                ConfigError::InvalidParameter {
                    name: "size_x",
                    reason: e.to_string(),
                }
            })?)
        } else {
            Lattice::Torus(Torus2D::new(config.size_y, config.size_x).map_err(|e| {
                ConfigError::InvalidParameter {
                    name: "size_y",
                    reason: e.to_string(),
                }
            })?)
        };
        let cells = lattice.cell_count();
        Ok(Self {
            max_step: config.max_step,
            lattice,
            seed: config.seed,
            step: 0,
            cells,
            history: vec![0; config.max_step * cells],
        })
    }

    /// The lattice topology (ring or torus).
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of cells per snapshot.
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Seed snapshot 0 with an explicit configuration instead of
    /// random draws. Non-zero values are normalized to 1.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::DimensionMismatch`] when `cells` does not
    /// cover the lattice exactly.
    pub fn initialize_with(&mut self, cells: &[u8]) -> Result<(), StepError> {
        if cells.len() != self.cells {
            return Err(StepError::DimensionMismatch {
                expected: self.cells,
                got: cells.len(),
            });
        }
        for (slot, &cell) in self.history[..self.cells].iter_mut().zip(cells) {
            *slot = u8::from(cell != 0);
        }
        self.step = 0;
        Ok(())
    }

    fn row(&self, step: usize) -> &[u8] {
        let offset = step * self.cells;
        &self.history[offset..offset + self.cells]
    }
}

impl StepEngine for CellAutomatonEngine {
    type Init = ();
    type Update = dyn TransitionRule;
    type Snapshot<'a> = &'a [u8];

    fn max_step(&self) -> usize {
        self.max_step
    }

    fn step(&self) -> usize {
        self.step
    }

    fn initialize(&mut self, _init: &()) -> Result<(), StepError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        for cell in &mut self.history[..self.cells] {
            *cell = rng.gen_range(0..=1u8);
        }
        self.step = 0;
        Ok(())
    }

    fn update(&mut self, rule: &dyn TransitionRule) -> Result<(), StepError> {
        guard_capacity(self.step, self.max_step)?;
        let offset = self.step * self.cells;
        let (head, tail) = self.history.split_at_mut(offset + self.cells);
        let current = &head[offset..];
        let next = &mut tail[..self.cells];
        rule.apply(&self.lattice, current, next)
            .map_err(|reason| StepError::RuleFailed {
                name: rule.name().into(),
                reason,
            })?;
        self.step += 1;
        Ok(())
    }

    fn snapshot(&self, step: usize) -> Result<&[u8], StepError> {
        if step > self.step {
            return Err(StepError::SnapshotOutOfRange {
                requested: step,
                recorded: self.step,
            });
        }
        Ok(self.row(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_engine(max_step: usize, size_x: usize) -> CellAutomatonEngine {
        CellAutomatonEngine::new(AutomatonConfig {
            max_step,
            size_x,
            size_y: 1,
            seed: 42,
        })
        .unwrap()
    }

    fn torus_engine(max_step: usize, size_x: usize, size_y: usize) -> CellAutomatonEngine {
        CellAutomatonEngine::new(AutomatonConfig {
            max_step,
            size_x,
            size_y,
            seed: 42,
        })
        .unwrap()
    }

    #[test]
    fn random_initialize_is_reproducible_and_binary() {
        let mut a = ring_engine(5, 64);
        let mut b = ring_engine(5, 64);
        a.initialize(&()).unwrap();
        b.initialize(&()).unwrap();
        assert_eq!(a.snapshot(0).unwrap(), b.snapshot(0).unwrap());
        assert!(a.snapshot(0).unwrap().iter().all(|&c| c <= 1));
        // A different seed must give a different draw at this size.
        let mut c = CellAutomatonEngine::new(AutomatonConfig {
            max_step: 5,
            size_x: 64,
            size_y: 1,
            seed: 7,
        })
        .unwrap();
        c.initialize(&()).unwrap();
        assert_ne!(a.snapshot(0).unwrap(), c.snapshot(0).unwrap());
    }

    #[test]
    fn rule184_hand_computed_successor() {
        let mut e = ring_engine(3, 8);
        e.initialize_with(&[1, 0, 1, 1, 0, 0, 1, 0]).unwrap();
        e.update(&Rule184).unwrap();
        assert_eq!(e.snapshot(1).unwrap(), &[0, 1, 1, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn rule184_conserves_car_count() {
        // Rule 184 moves "cars" right; it never creates or destroys them.
        let mut e = ring_engine(20, 16);
        e.initialize(&()).unwrap();
        let cars: u32 = e.snapshot(0).unwrap().iter().map(|&c| u32::from(c)).sum();
        e.simulate(None, &Rule184).unwrap();
        for step in 0..=e.step() {
            let count: u32 = e
                .snapshot(step)
                .unwrap()
                .iter()
                .map(|&c| u32::from(c))
                .sum();
            assert_eq!(count, cars, "car count changed at step {step}");
        }
    }

    #[test]
    fn rule184_rejects_2d_lattice() {
        let mut e = torus_engine(3, 4, 4);
        e.initialize(&()).unwrap();
        let err = e.update(&Rule184).unwrap_err();
        assert!(matches!(
            err,
            StepError::RuleFailed { ref name, .. } if name == "rule184"
        ));
        assert_eq!(e.step(), 0);
    }

    #[test]
    fn game_of_life_rejects_1d_lattice() {
        let mut e = ring_engine(3, 8);
        e.initialize(&()).unwrap();
        assert!(e.update(&GameOfLife).is_err());
    }

    #[test]
    fn lone_cell_dies_on_3x3_torus() {
        let mut e = torus_engine(2, 3, 3);
        let mut cells = [0u8; 9];
        cells[4] = 1;
        e.initialize_with(&cells).unwrap();
        e.update(&GameOfLife).unwrap();
        assert_eq!(e.snapshot(1).unwrap(), &[0; 9]);
    }

    #[test]
    fn block_is_a_still_life_on_4x4_torus() {
        let mut e = torus_engine(6, 4, 4);
        #[rustfmt::skip]
        let block = [
            1, 1, 0, 0,
            1, 1, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ];
        e.initialize_with(&block).unwrap();
        e.simulate(None, &GameOfLife).unwrap();
        assert_eq!(e.step(), 5);
        for step in 1..=5 {
            assert_eq!(e.snapshot(step).unwrap(), &block, "block moved at step {step}");
        }
    }

    #[test]
    fn initialize_with_wrong_length_fails() {
        let mut e = ring_engine(3, 8);
        assert_eq!(
            e.initialize_with(&[1, 0, 1]),
            Err(StepError::DimensionMismatch {
                expected: 8,
                got: 3,
            })
        );
    }

    #[test]
    fn from_params_defaults() {
        let p = Params::new().with("max_step", 10.0).with("size_x", 32.0);
        let cfg = AutomatonConfig::from_params(&p).unwrap();
        assert_eq!(cfg.size_y, 1);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn from_params_accepts_seed_zero() {
        let p = Params::new()
            .with("max_step", 10.0)
            .with("size_x", 32.0)
            .with("seed", 0.0);
        let cfg = AutomatonConfig::from_params(&p).unwrap();
        assert_eq!(cfg.seed, 0);
        assert!(CellAutomatonEngine::new(cfg).is_ok());
    }
}
