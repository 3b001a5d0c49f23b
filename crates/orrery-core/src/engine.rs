//! The [`StepEngine`] trait: the shared stepping protocol.
//!
//! Every concrete engine follows the same lifecycle: `initialize`
//! writes index 0 of all state containers, each `update` writes
//! exactly index `step + 1` and advances the step counter by one, and
//! `snapshot` hands a recorded state back to an external renderer.
//! The `simulate` driver is implemented once against the trait.

use crate::error::StepError;

/// Guard an `update` against writing past the preallocated history.
///
/// Must be called before any state mutation so that a refused update
/// leaves no partial write behind.
///
/// # Errors
///
/// Returns [`StepError::BufferExhausted`] when `step == max_step - 1`.
pub fn guard_capacity(step: usize, max_step: usize) -> Result<(), StepError> {
    if step + 1 >= max_step {
        return Err(StepError::BufferExhausted { max_step });
    }
    Ok(())
}

/// Progress counters for a run, derived from the step counters.
///
/// Returned by [`StepEngine::metrics`]; callers that want run
/// telemetry read this value instead of the engine emitting logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunMetrics {
    /// Updates applied since the last `initialize`.
    pub steps_executed: usize,
    /// Updates still possible before the history is full.
    pub capacity_remaining: usize,
}

/// The shared contract implemented by every simulation engine.
///
/// # Lifecycle
///
/// 1. Construct the engine (buffers preallocated for `max_step`
///    snapshots; construction parameters validated up front).
/// 2. [`initialize`](Self::initialize) — populate snapshot 0 and reset
///    the step counter.
/// 3. [`simulate`](Self::simulate) (or repeated
///    [`update`](Self::update)) — advance the step counter one
///    snapshot at a time.
/// 4. [`snapshot`](Self::snapshot) — read recorded states back for
///    rendering.
///
/// # Invariants
///
/// - `0 <= step() <= max_step() - 1` at all times.
/// - Each successful `update` writes exactly index `step + 1` and
///   increments `step` by exactly 1; a failed `update` mutates
///   nothing.
/// - Every state transition is synchronous: the next snapshot is
///   computed solely from the frozen previous snapshot.
pub trait StepEngine {
    /// Payload accepted by [`initialize`](Self::initialize):
    /// an initial state vector for the history engines, `()` for
    /// engines that self-seed from their RNG.
    type Init: ?Sized;

    /// Per-step parameters: the transition rule, derivative, or
    /// coupling constants applied by [`update`](Self::update).
    type Update: ?Sized;

    /// Read-only view of one recorded snapshot, borrowed from the
    /// engine's history buffer.
    type Snapshot<'a>
    where
        Self: 'a;

    /// History capacity fixed at construction.
    fn max_step(&self) -> usize;

    /// The current step counter (index of the last written snapshot).
    fn step(&self) -> usize;

    /// Populate snapshot 0 and reset the step counter to 0.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::DimensionMismatch`] when an initial state
    /// vector's length differs from the engine's declared dimension.
    fn initialize(&mut self, init: &Self::Init) -> Result<(), StepError>;

    /// Compute snapshot `step + 1` from snapshot `step` and advance
    /// the counter.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::BufferExhausted`] when the history is
    /// full, or [`StepError::RuleFailed`] when the supplied rule
    /// rejects the state. Either way no buffer is mutated for the
    /// failed step.
    fn update(&mut self, params: &Self::Update) -> Result<(), StepError>;

    /// The recorded snapshot at `step`, for an external renderer.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::SnapshotOutOfRange`] when `step` exceeds
    /// the last recorded index.
    fn snapshot(&self, step: usize) -> Result<Self::Snapshot<'_>, StepError>;

    /// Drive [`update`](Self::update) until the step counter reaches
    /// `stop_step - 1`.
    ///
    /// `stop_step` defaults to [`max_step`](Self::max_step) and is
    /// clamped to it. A `stop_step` at or below `step + 1` is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the first [`StepError`] from `update`; prior
    /// snapshots remain recorded.
    fn simulate(
        &mut self,
        stop_step: Option<usize>,
        params: &Self::Update,
    ) -> Result<(), StepError> {
        let stop = stop_step.unwrap_or_else(|| self.max_step()).min(self.max_step());
        while self.step() + 1 < stop {
            self.update(params)?;
        }
        Ok(())
    }

    /// Progress counters for the current run.
    fn metrics(&self) -> RunMetrics {
        RunMetrics {
            steps_executed: self.step(),
            capacity_remaining: self.max_step() - 1 - self.step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal engine recording one f64 per step.
    struct Counter {
        history: Vec<f64>,
        step: usize,
        max_step: usize,
    }

    impl Counter {
        fn new(max_step: usize) -> Self {
            Self {
                history: vec![0.0; max_step],
                step: 0,
                max_step,
            }
        }
    }

    impl StepEngine for Counter {
        type Init = f64;
        type Update = ();
        type Snapshot<'a> = f64;

        fn max_step(&self) -> usize {
            self.max_step
        }

        fn step(&self) -> usize {
            self.step
        }

        fn initialize(&mut self, init: &f64) -> Result<(), StepError> {
            self.history[0] = *init;
            self.step = 0;
            Ok(())
        }

        fn update(&mut self, _params: &()) -> Result<(), StepError> {
            guard_capacity(self.step, self.max_step)?;
            self.history[self.step + 1] = self.history[self.step] + 1.0;
            self.step += 1;
            Ok(())
        }

        fn snapshot(&self, step: usize) -> Result<f64, StepError> {
            if step > self.step {
                return Err(StepError::SnapshotOutOfRange {
                    requested: step,
                    recorded: self.step,
                });
            }
            Ok(self.history[step])
        }
    }

    #[test]
    fn simulate_runs_to_max_step() {
        let mut e = Counter::new(10);
        e.initialize(&0.0).unwrap();
        e.simulate(None, &()).unwrap();
        assert_eq!(e.step(), 9);
        assert_eq!(e.snapshot(9).unwrap(), 9.0);
    }

    #[test]
    fn simulate_clamps_stop_step() {
        let mut e = Counter::new(5);
        e.initialize(&0.0).unwrap();
        e.simulate(Some(100), &()).unwrap();
        assert_eq!(e.step(), 4);
    }

    #[test]
    fn simulate_past_current_step_is_noop() {
        let mut e = Counter::new(10);
        e.initialize(&0.0).unwrap();
        e.simulate(Some(6), &()).unwrap();
        assert_eq!(e.step(), 5);
        // stop_step <= step + 1 must not move the counter.
        e.simulate(Some(6), &()).unwrap();
        assert_eq!(e.step(), 5);
        e.simulate(Some(3), &()).unwrap();
        assert_eq!(e.step(), 5);
        e.simulate(Some(0), &()).unwrap();
        assert_eq!(e.step(), 5);
    }

    #[test]
    fn update_past_capacity_is_buffer_exhausted() {
        let mut e = Counter::new(3);
        e.initialize(&0.0).unwrap();
        e.simulate(None, &()).unwrap();
        assert_eq!(e.step(), 2);
        assert_eq!(
            e.update(&()),
            Err(StepError::BufferExhausted { max_step: 3 })
        );
        // Failed update must not have moved the counter.
        assert_eq!(e.step(), 2);
    }

    #[test]
    fn snapshot_out_of_range() {
        let mut e = Counter::new(4);
        e.initialize(&0.0).unwrap();
        assert_eq!(
            e.snapshot(1),
            Err(StepError::SnapshotOutOfRange {
                requested: 1,
                recorded: 0,
            })
        );
    }

    #[test]
    fn metrics_track_the_step_counter() {
        let mut e = Counter::new(5);
        e.initialize(&0.0).unwrap();
        assert_eq!(
            e.metrics(),
            RunMetrics {
                steps_executed: 0,
                capacity_remaining: 4,
            }
        );
        e.simulate(Some(3), &()).unwrap();
        assert_eq!(
            e.metrics(),
            RunMetrics {
                steps_executed: 2,
                capacity_remaining: 2,
            }
        );
    }

    #[test]
    fn guard_capacity_boundary() {
        assert!(guard_capacity(0, 2).is_ok());
        assert_eq!(
            guard_capacity(1, 2),
            Err(StepError::BufferExhausted { max_step: 2 })
        );
    }
}
