//! 2D toroidal grid (periodic boundary on both axes).

use smallvec::SmallVec;

use crate::error::SpaceError;

/// All 8 Moore offsets: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A two-dimensional grid with toroidal adjacency.
///
/// Cells are addressed `(row, col)` and stored row-major; both axes
/// wrap, so every cell has a full von Neumann (4) and Moore (8)
/// neighbourhood. On extents smaller than 3 the wrapped offsets can
/// alias, which matches periodic-convolution semantics.
///
/// # Examples
///
/// ```
/// use orrery_space::Torus2D;
///
/// let t = Torus2D::new(3, 4).unwrap();
/// assert_eq!(t.cell_count(), 12);
/// assert_eq!(t.index(1, 2), 6);
/// assert_eq!(t.wrap(-1, 4), t.index(2, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Torus2D {
    rows: usize,
    cols: usize,
}

impl Torus2D {
    /// Create a new torus with `rows * cols` cells.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::EmptySpace`] if either extent is 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major flat index of an in-range `(row, col)`.
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Flat index of a possibly-out-of-range `(row, col)`, wrapped
    /// onto the torus.
    pub fn wrap(&self, row: isize, col: isize) -> usize {
        let r = self.rows as isize;
        let c = self.cols as isize;
        let row = (((row % r) + r) % r) as usize;
        let col = (((col % c) + c) % c) as usize;
        row * self.cols + col
    }

    /// The four cardinal (von Neumann) neighbours of `(row, col)`,
    /// in N, S, W, E order.
    pub fn von_neumann(&self, row: usize, col: usize) -> [usize; 4] {
        let (r, c) = (row as isize, col as isize);
        [
            self.wrap(r - 1, c),
            self.wrap(r + 1, c),
            self.wrap(r, c - 1),
            self.wrap(r, c + 1),
        ]
    }

    /// The eight Moore neighbours of `(row, col)` (cardinals plus
    /// diagonals), self excluded.
    pub fn moore(&self, row: usize, col: usize) -> SmallVec<[usize; 8]> {
        let (r, c) = (row as isize, col as isize);
        OFFSETS_8
            .iter()
            .map(|&(dr, dc)| self.wrap(r + dr, c + dc))
            .collect()
    }
}
