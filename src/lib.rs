//! Blockfall (workspace facade crate).
//!
//! Re-exports the crates under `crates/` as `blockfall::{core, input, term, types}`
//! and holds the runtime settings used by the terminal binary.

pub mod settings;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
