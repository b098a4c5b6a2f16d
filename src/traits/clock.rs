//! Time source trait abstraction.
//!
//! The trackers and persistence adapters never read the system clock
//! directly; they consume an injected [`Clock`] so debounce and throttle
//! logic is deterministic under test.

use chrono::{DateTime, Utc};

/// Trait for the collector's time source.
///
/// Wall-clock time stamps events and evaluates durable expiry; monotonic
/// milliseconds drive gap and deadline arithmetic (inter-click gaps, hover
/// debounce deadlines, the scroll throttle window).
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Milliseconds elapsed since an arbitrary fixed origin.
    ///
    /// Monotonic: never decreases, unaffected by wall-clock adjustments.
    fn now_millis(&self) -> u64;
}
