//! rr-core: shared types for the Randomych decision randomizer
//!
//! Modes, spin-count rules and the common error type used by every crate.

pub mod error;
pub mod mode;

pub use error::*;
pub use mode::*;
