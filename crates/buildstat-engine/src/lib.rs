//! buildstat Engine - build-event orchestration
//!
//! Wires the pure core (normalize, diff, assemble, render) to the store and
//! report sink for one completed build at a time.

pub mod clock;
pub mod reporter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use reporter::{BuildOutcome, BuildReporter};
