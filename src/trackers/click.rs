//! Click instrumentation.
//!
//! Emits a `buttonClick` event per tracked click and maintains the running
//! inter-click latency average: `average' = (average + gap) / 2`, weighting
//! the latest gap at 50%. The average survives page loads under a durable
//! key. The recurrence is the collector's historical contract; it is not a
//! true mean and must not be "corrected" into one.

use std::sync::Arc;

use crate::config::DURABLE_TTL_DAYS;
use crate::delivery::EventSink;
use crate::events::{Event, EventType};
use crate::traits::{Clock, Lifetime, VisitorStore};

/// Durable key holding the running inter-click average in milliseconds.
pub const AVG_CLICK_DIST_KEY: &str = "avg_click_dist";

/// Tracks clicks across the whole element set.
///
/// The inter-click gap is process-wide: any tracked click advances the
/// reference point, regardless of which element was clicked. The first gap
/// of a page load is measured from tracker construction.
pub struct ClickTracker {
    store: Arc<dyn VisitorStore>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
    last_click_ms: u64,
    average_ms: f64,
}

impl ClickTracker {
    /// Create a tracker, loading the persisted average (0 when absent).
    pub fn new(
        store: Arc<dyn VisitorStore>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let average_ms = match store.get(AVG_CLICK_DIST_KEY) {
            Ok(value) => value.and_then(|v| v.parse().ok()).unwrap_or(0.0),
            Err(e) => {
                tracing::warn!("average read failed, starting at 0: {}", e);
                0.0
            }
        };
        let last_click_ms = clock.now_millis();
        Self {
            store,
            clock,
            sink,
            last_click_ms,
            average_ms,
        }
    }

    /// Handle one click on a tracked element.
    ///
    /// Emits `buttonClick`, then updates and persists the running average
    /// and emits `avgClickDist`. The two emissions are ordered but are
    /// independent deliveries.
    pub fn record_click(&mut self, element_class: &str) {
        let now_ms = self.clock.now_millis();
        let at = self.clock.now_utc();

        self.sink
            .emit(Event::new(EventType::ButtonClick, at, element_class));

        let gap_ms = now_ms.saturating_sub(self.last_click_ms) as f64;
        self.last_click_ms = now_ms;
        self.average_ms = (self.average_ms + gap_ms) / 2.0;

        if let Err(e) = self.store.set(
            AVG_CLICK_DIST_KEY,
            &self.average_ms.to_string(),
            Lifetime::Durable { days: DURABLE_TTL_DAYS },
        ) {
            tracing::warn!("average write failed: {}", e);
        }

        self.sink.emit(Event::new(
            EventType::AvgClickDist,
            at,
            self.average_ms.to_string(),
        ));
    }

    /// The current running average in milliseconds.
    pub fn average_ms(&self) -> f64 {
        self.average_ms
    }
}
