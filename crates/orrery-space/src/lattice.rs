//! The [`Lattice`] enum handed to automaton transition rules.

use crate::ring1d::Ring1D;
use crate::torus2d::Torus2D;

/// The spatial topology of a cellular automaton: a 1D ring or a 2D
/// torus.
///
/// Transition rules match on the variant they support and reject the
/// other; both variants wrap at the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lattice {
    /// One-dimensional ring.
    Ring(Ring1D),
    /// Two-dimensional torus.
    Torus(Torus2D),
}

impl Lattice {
    /// Total number of cells in the lattice.
    pub fn cell_count(&self) -> usize {
        match self {
            Self::Ring(r) => r.len(),
            Self::Torus(t) => t.cell_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_count_matches_backend() {
        let ring = Lattice::Ring(Ring1D::new(8).unwrap());
        assert_eq!(ring.cell_count(), 8);
        let torus = Lattice::Torus(Torus2D::new(4, 5).unwrap());
        assert_eq!(torus.cell_count(), 20);
    }
}
