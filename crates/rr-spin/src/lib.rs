//! # rr-spin — Spin & aggregate engine for Randomych
//!
//! Generates the randomized carousels of a session, drives their sequential
//! playout as a guarded state machine, and folds the per-round winners into a
//! plurality result with a first-occurrence tie-break.
//!
//! ## Architecture
//!
//! ```text
//! SpinSession
//!     │
//!     ├── RandomSource (uniform int / pick / coin flip)
//!     ├── generate_carousel × spin_count   (all draws committed at start)
//!     └── aggregate(winners) → AggregatedResult
//!           │
//!           v
//!     TimingConfig → Vec<PlayoutEvent>
//! ```

pub mod aggregate;
pub mod carousel;
pub mod playout;
pub mod random;
pub mod session;
pub mod timing;

pub use aggregate::*;
pub use carousel::*;
pub use playout::*;
pub use random::*;
pub use session::*;
pub use timing::*;
