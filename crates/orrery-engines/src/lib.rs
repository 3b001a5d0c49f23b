//! Reference engines for the Orrery simulation framework.
//!
//! Five concrete engines share the [`StepEngine`](orrery_core::StepEngine)
//! lifecycle:
//!
//! - [`DifferenceEngine`] — iterated maps over a dense state history.
//! - [`OdeEngine`] — explicit-Euler ODE integration with a time axis.
//! - [`CellAutomatonEngine`] — synchronous binary automata on periodic
//!   lattices.
//! - [`ReactionDiffusionEngine`] — discretized PDEs on a 2D torus.
//! - [`NetworkEngine`] — linearly coupled oscillators on a fixed graph.
//!
//! Each engine owns its buffers exclusively, preallocates the full
//! history at construction, and computes every new snapshot solely
//! from the frozen previous one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod automaton;
mod difference;
mod network;
mod ode;
mod reaction_diffusion;

pub use automaton::{
    AutomatonConfig, CellAutomatonEngine, GameOfLife, Rule184, TransitionRule,
};
pub use difference::{DifferenceConfig, DifferenceEngine, Identity, MapRule};
pub use network::{LinearCoupling, NetworkConfig, NetworkEngine, NetworkSnapshot};
pub use ode::{LotkaVolterra, OdeConfig, OdeEngine, OdeSnapshot, VectorField};
pub use reaction_diffusion::{
    FieldDerivative, ReactionDiffusionConfig, ReactionDiffusionEngine, TuringReaction,
};
