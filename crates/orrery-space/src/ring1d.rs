//! 1D ring lattice (always-wrap periodic boundary).

use smallvec::{smallvec, SmallVec};

use crate::error::SpaceError;

/// A one-dimensional ring of cells (periodic boundary).
///
/// Cell `0` and cell `len - 1` are adjacent; every cell has exactly
/// two neighbours.
///
/// # Examples
///
/// ```
/// use orrery_space::Ring1D;
///
/// let ring = Ring1D::new(8).unwrap();
/// assert_eq!(ring.len(), 8);
/// assert_eq!(ring.wrap(-1), 7);
/// assert_eq!(ring.wrap(8), 0);
/// assert_eq!(ring.neighbours(0).as_slice(), &[7, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring1D {
    len: usize,
}

impl Ring1D {
    /// Create a new ring with `len` cells.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::EmptySpace`] if `len == 0`.
    pub fn new(len: usize) -> Result<Self, SpaceError> {
        if len == 0 {
            return Err(SpaceError::EmptySpace);
        }
        Ok(Self { len })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always returns `false` — construction rejects `len == 0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resolve a possibly-out-of-range index onto the ring.
    pub fn wrap(&self, i: isize) -> usize {
        let n = self.len as isize;
        (((i % n) + n) % n) as usize
    }

    /// The two neighbours of cell `i`, in `(left, right)` order.
    pub fn neighbours(&self, i: usize) -> SmallVec<[usize; 2]> {
        let i = i as isize;
        smallvec![self.wrap(i - 1), self.wrap(i + 1)]
    }
}
