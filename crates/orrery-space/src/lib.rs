//! Periodic lattices for the Orrery simulation framework.
//!
//! All topologies here wrap at the edges: a [`Ring1D`] is a circle of
//! cells, a [`Torus2D`] is a 2D grid with toroidal adjacency. Index
//! arithmetic wraps modulo the lattice extent, so stencils and
//! neighbourhood rules never see a boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod lattice;
mod ring1d;
mod torus2d;

pub use error::SpaceError;
pub use lattice::Lattice;
pub use ring1d::Ring1D;
pub use torus2d::Torus2D;
