//! Orrery: a uniform stepping protocol for discrete-time dynamical
//! models.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Orrery sub-crates. For most users, adding `orrery` as a
//! single dependency is sufficient.
//!
//! Five engines share one lifecycle — construct, `initialize`,
//! `simulate`, query snapshots:
//!
//! - iterated maps ([`engines::DifferenceEngine`])
//! - explicit-Euler ODEs ([`engines::OdeEngine`])
//! - cellular automata ([`engines::CellAutomatonEngine`])
//! - reaction-diffusion PDEs ([`engines::ReactionDiffusionEngine`])
//! - coupled oscillators on graphs ([`engines::NetworkEngine`])
//!
//! # Quick start
//!
//! ```rust
//! use orrery::prelude::*;
//!
//! // Integrate the Lotka-Volterra predator-prey system.
//! let mut engine = OdeEngine::new(OdeConfig {
//!     max_step: 1000,
//!     dim: 2,
//!     dt: 0.01,
//! })
//! .unwrap();
//! engine.initialize(&[10.0, 10.0]).unwrap();
//! let field = LotkaVolterra {
//!     a: 1.1,
//!     b: 0.4,
//!     c: 0.4,
//!     d: 0.1,
//! };
//! engine.simulate(None, &field).unwrap();
//!
//! // Hand snapshots to a renderer.
//! assert_eq!(engine.step(), 999);
//! let last = engine.snapshot(engine.step()).unwrap();
//! assert!(last.state.iter().all(|v| v.is_finite()));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `orrery-core` | Step contract, errors, parameter map |
//! | [`space`] | `orrery-space` | Periodic lattices (ring, torus) |
//! | [`graph`] | `orrery-graph` | Graph topologies and providers |
//! | [`engines`] | `orrery-engines` | The five reference engines |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Step contract, error taxonomy, and parameter map (`orrery-core`).
pub use orrery_core as core;

/// Periodic lattices (`orrery-space`).
pub use orrery_space as space;

/// Graph topologies and providers (`orrery-graph`).
pub use orrery_graph as graph;

/// The five reference engines and their built-in rules
/// (`orrery-engines`).
pub use orrery_engines as engines;

/// Common imports for typical Orrery usage.
///
/// ```rust
/// use orrery::prelude::*;
/// ```
pub mod prelude {
    // Contract and errors
    pub use orrery_core::{ConfigError, Params, RuleError, RunMetrics, StepEngine, StepError};

    // Lattices
    pub use orrery_space::{Lattice, Ring1D, Torus2D};

    // Graphs
    pub use orrery_graph::{
        CompleteGraph, CycleGraph, GraphProvider, KarateClub, Topology,
    };

    // Engines and built-in rules
    pub use orrery_engines::{
        AutomatonConfig, CellAutomatonEngine, DifferenceConfig, DifferenceEngine,
        FieldDerivative, GameOfLife, Identity, LinearCoupling, LotkaVolterra, MapRule,
        NetworkConfig, NetworkEngine, NetworkSnapshot, OdeConfig, OdeEngine, OdeSnapshot,
        ReactionDiffusionConfig, ReactionDiffusionEngine, Rule184, TransitionRule,
        TuringReaction, VectorField,
    };
}
