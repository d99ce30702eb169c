//! rr-state: configuration carried between screens
//!
//! Owns the "last used" values and turns them into session inputs.

mod last_used;

pub use last_used::*;
