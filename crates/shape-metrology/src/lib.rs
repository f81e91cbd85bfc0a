//! Umbrella crate for the `shape-metrology` workspace.
//!
//! Re-exports the synthesis and measurement crates together with the core
//! geometry types they share, so downstream users need a single dependency.

pub use sm_core::*;
pub use sm_measure::*;
pub use sm_synth::*;
