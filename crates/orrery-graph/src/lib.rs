//! Graph topologies for the Orrery network engine.
//!
//! A [`Topology`] is an immutable node/adjacency structure shared
//! (via `Arc`) across every snapshot of a network simulation — only
//! per-node state changes between steps, never the wiring. The
//! [`GraphProvider`] trait is the seam through which external graph
//! construction is delegated; [`KarateClub`], [`CycleGraph`], and
//! [`CompleteGraph`] are the bundled reference providers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod provider;
mod topology;

pub use error::GraphError;
pub use provider::{CompleteGraph, CycleGraph, GraphProvider, KarateClub};
pub use topology::Topology;
