//! Monotonic clock for order and trade timestamps.
//!
//! Timestamps are nanoseconds from a process-wide anchor taken on first use.
//! `std::time::Instant` never goes backwards, which is what ordering needs;
//! wall-clock time is not.
//!
//! The book takes the clock as a plain `fn() -> Timestamp` so tests can
//! substitute a deterministic source.

use std::sync::OnceLock;
use std::time::Instant;

use crate::Timestamp;

static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Nanoseconds elapsed since the first call in this process.
pub fn monotonic_nanos() -> Timestamp {
    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos() as Timestamp
}
