//! Core contract for the Orrery simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the shared stepping protocol ([`StepEngine`]), the error taxonomy
//! ([`StepError`], [`RuleError`], [`ConfigError`]), and the flat
//! parameter map ([`Params`]) through which an external parameter
//! source supplies construction values.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod params;

pub use engine::{guard_capacity, RunMetrics, StepEngine};
pub use error::{ConfigError, RuleError, StepError};
pub use params::Params;
