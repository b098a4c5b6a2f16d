//! Manually-advanced clock for testing.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

use crate::traits::Clock;

#[derive(Debug)]
struct MockClockState {
    now_utc: DateTime<Utc>,
    now_millis: u64,
}

/// A [`Clock`] that only moves when told to.
///
/// Cloning shares the underlying state, so a clone handed to a component
/// observes every [`advance_ms`](MockClock::advance_ms) made through the
/// original. Wall-clock and monotonic time advance together.
#[derive(Debug, Clone)]
pub struct MockClock {
    state: Arc<Mutex<MockClockState>>,
}

impl MockClock {
    /// Create a clock starting at `start`, with the monotonic origin at 0.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockClockState {
                now_utc: start,
                now_millis: 0,
            })),
        }
    }

    /// Advance both time scales by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        let mut state = self.state.lock().unwrap();
        state.now_utc += Duration::milliseconds(ms as i64);
        state.now_millis += ms;
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.state.lock().unwrap().now_utc
    }

    fn now_millis(&self) -> u64 {
        self.state.lock().unwrap().now_millis
    }
}
