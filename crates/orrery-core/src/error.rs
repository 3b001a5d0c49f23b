//! Error types for the Orrery simulation framework.
//!
//! Organized by lifecycle phase: [`ConfigError`] at construction,
//! [`StepError`] during `initialize`/`update`/`snapshot`, and
//! [`RuleError`] from individual transition rules, wrapped in
//! [`StepError::RuleFailed`] by the owning engine.

use std::error::Error;
use std::fmt;

/// Errors from an engine during `initialize`, `update`, or `snapshot`.
///
/// Every variant is fatal: no operation is retried, and a failed
/// `update` leaves the history buffer untouched for the failed step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// An initial-state vector's length differs from the declared
    /// dimension. The vector is never truncated or padded.
    DimensionMismatch {
        /// The dimension declared at construction.
        expected: usize,
        /// The length of the supplied vector.
        got: usize,
    },
    /// An `update` was requested past the last preallocated index.
    ///
    /// Checked before any state mutation so no partial write occurs.
    BufferExhausted {
        /// The history capacity fixed at construction.
        max_step: usize,
    },
    /// A snapshot was requested beyond the recorded history.
    SnapshotOutOfRange {
        /// The requested step index.
        requested: usize,
        /// The last recorded step index.
        recorded: usize,
    },
    /// A transition rule or derivative rejected its input.
    RuleFailed {
        /// Name of the failing rule.
        name: String,
        /// The underlying rule error.
        reason: RuleError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, got } => {
                write!(f, "initial state has length {got}, expected {expected}")
            }
            Self::BufferExhausted { max_step } => {
                write!(f, "history buffer exhausted at max_step {max_step}")
            }
            Self::SnapshotOutOfRange {
                requested,
                recorded,
            } => {
                write!(f, "snapshot {requested} requested, last recorded step is {recorded}")
            }
            Self::RuleFailed { name, reason } => {
                write!(f, "rule '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RuleFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors from individual rule or derivative evaluation.
///
/// Returned by rule seams (`TransitionRule`, `FieldDerivative`,
/// `VectorField`) and wrapped in [`StepError::RuleFailed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// The rule cannot be applied to the supplied state.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for RuleError {}

/// Errors detected while validating construction parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A parameter value is outside its valid range
    /// (non-positive `max_step`, grid size, `dt`, `dh`, or zero `dim`).
    InvalidParameter {
        /// The parameter name.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
    /// A required parameter is absent from the parameter map.
    MissingParameter {
        /// The parameter name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            Self::MissingParameter { name } => {
                write!(f, "missing parameter '{name}'")
            }
        }
    }
}

impl Error for ConfigError {}
