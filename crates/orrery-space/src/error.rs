//! Error types for lattice construction.

use std::fmt;

/// Errors arising from lattice construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero cells.
    EmptySpace,
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "lattice must have at least one cell"),
        }
    }
}

impl std::error::Error for SpaceError {}
