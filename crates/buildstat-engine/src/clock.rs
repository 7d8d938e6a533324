//! Clock port for report timestamps.

use chrono::{DateTime, FixedOffset, Local};

/// Provides the current wall-clock time.
///
/// Reports are stamped and named from this, so tests substitute a
/// [`FixedClock`].
pub trait Clock: Send + Sync {
    /// Current time in the host's local offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The system clock, in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
