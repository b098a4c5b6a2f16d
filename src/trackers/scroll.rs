//! Scroll depth instrumentation.
//!
//! Leading-edge throttle over raw scroll signals: at most one recorded
//! sample per throttle window, with every other signal dropped. The window
//! resets only by the passage of time, never by scroll direction or
//! position.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::delivery::EventSink;
use crate::events::{Event, EventType};
use crate::page::ScrollGeometry;
use crate::traits::Clock;

/// One recorded scroll depth observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSample {
    /// Depth as a percentage of the scrollable range, rounded to 2 decimals.
    pub scroll_percentage: f64,
    pub observed_at: DateTime<Utc>,
}

/// Tracks throttled scroll depth for the page.
pub struct ScrollTracker {
    throttle_ms: u64,
    last_recorded_ms: Option<u64>,
    samples: Vec<ScrollSample>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl ScrollTracker {
    /// Create a tracker with the given throttle window.
    pub fn new(clock: Arc<dyn Clock>, sink: Arc<dyn EventSink>, throttle_ms: u64) -> Self {
        Self {
            throttle_ms,
            last_recorded_ms: None,
            samples: Vec::new(),
            clock,
            sink,
        }
    }

    /// Handle one raw scroll signal.
    ///
    /// Records a sample and emits `scrollDepth` if the throttle window has
    /// elapsed since the last recorded sample (the first signal always
    /// records); otherwise the signal is dropped.
    pub fn on_scroll(&mut self, geometry: &ScrollGeometry) {
        let now_ms = self.clock.now_millis();
        if let Some(last_ms) = self.last_recorded_ms {
            if now_ms - last_ms < self.throttle_ms {
                return;
            }
        }
        self.last_recorded_ms = Some(now_ms);

        let scroll_percentage = scroll_percentage(geometry);
        let observed_at = self.clock.now_utc();
        self.samples.push(ScrollSample {
            scroll_percentage,
            observed_at,
        });
        self.sink.emit(Event::new(
            EventType::ScrollDepth,
            observed_at,
            scroll_percentage.to_string(),
        ));
    }

    /// The page-lifetime log of recorded samples.
    pub fn samples(&self) -> &[ScrollSample] {
        &self.samples
    }
}

/// Depth as a percentage of the scrollable range, rounded to 2 decimals.
///
/// A document no taller than the viewport has no scrollable range; depth
/// reports as 0 rather than dividing by zero.
fn scroll_percentage(geometry: &ScrollGeometry) -> f64 {
    let scrollable = geometry.document_height() - geometry.viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    let raw = geometry.scroll_top / scrollable * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockClock, RecordingSink};
    use chrono::TimeZone;

    struct Fixture {
        tracker: ScrollTracker,
        clock: MockClock,
        sink: RecordingSink,
    }

    fn fixture() -> Fixture {
        let clock = MockClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        let sink = RecordingSink::new();
        let tracker = ScrollTracker::new(Arc::new(clock.clone()), Arc::new(sink.clone()), 5000);
        Fixture {
            tracker,
            clock,
            sink,
        }
    }

    fn geometry_at(scroll_top: f64) -> ScrollGeometry {
        ScrollGeometry {
            scroll_top,
            viewport_height: 800.0,
            body_scroll_height: 2800.0,
            body_offset_height: 2800.0,
            document_client_height: 800.0,
            document_scroll_height: 2800.0,
            document_offset_height: 2800.0,
        }
    }

    #[test]
    fn test_first_signal_records_immediately() {
        let mut f = fixture();
        f.tracker.on_scroll(&geometry_at(500.0));
        assert_eq!(f.tracker.samples().len(), 1);
        assert_eq!(f.sink.events().len(), 1);
    }

    #[test]
    fn test_burst_within_window_records_once() {
        let mut f = fixture();
        for i in 0..10 {
            f.tracker.on_scroll(&geometry_at(100.0 * f64::from(i)));
            f.clock.advance_ms(100);
        }
        assert_eq!(f.tracker.samples().len(), 1);
        assert_eq!(f.sink.events().len(), 1);
    }

    #[test]
    fn test_signal_after_window_records_again() {
        let mut f = fixture();
        f.tracker.on_scroll(&geometry_at(0.0));
        f.clock.advance_ms(5001);
        f.tracker.on_scroll(&geometry_at(1000.0));
        assert_eq!(f.tracker.samples().len(), 2);
    }

    #[test]
    fn test_signal_exactly_at_window_records() {
        let mut f = fixture();
        f.tracker.on_scroll(&geometry_at(0.0));
        f.clock.advance_ms(5000);
        f.tracker.on_scroll(&geometry_at(1000.0));
        assert_eq!(f.tracker.samples().len(), 2);
    }

    #[test]
    fn test_window_measured_from_last_recorded_sample() {
        let mut f = fixture();
        f.tracker.on_scroll(&geometry_at(0.0));
        f.clock.advance_ms(4000);
        // Dropped; must not push the window out.
        f.tracker.on_scroll(&geometry_at(500.0));
        f.clock.advance_ms(1000);
        f.tracker.on_scroll(&geometry_at(1000.0));
        assert_eq!(f.tracker.samples().len(), 2);
    }

    #[test]
    fn test_percentage_computation_and_rounding() {
        let mut f = fixture();
        // 500 / (2800 - 800) * 100 = 25
        f.tracker.on_scroll(&geometry_at(500.0));
        assert_eq!(f.tracker.samples()[0].scroll_percentage, 25.0);
        assert_eq!(f.sink.events()[0].event_data, "25");

        f.clock.advance_ms(5000);
        // 1234.5 / 2000 * 100 = 61.725, rounded to 61.73
        f.tracker.on_scroll(&geometry_at(1234.5));
        assert_eq!(f.tracker.samples()[1].scroll_percentage, 61.73);
        assert_eq!(f.sink.events()[1].event_data, "61.73");
    }

    #[test]
    fn test_unscrollable_document_reports_zero() {
        let mut f = fixture();
        let geometry = ScrollGeometry {
            scroll_top: 0.0,
            viewport_height: 800.0,
            body_scroll_height: 800.0,
            body_offset_height: 800.0,
            document_client_height: 800.0,
            document_scroll_height: 800.0,
            document_offset_height: 800.0,
        };
        f.tracker.on_scroll(&geometry);
        assert_eq!(f.tracker.samples()[0].scroll_percentage, 0.0);
        assert_eq!(f.sink.events()[0].event_data, "0");
    }

    #[test]
    fn test_document_height_uses_max_measurement() {
        let mut f = fixture();
        let geometry = ScrollGeometry {
            scroll_top: 600.0,
            viewport_height: 800.0,
            body_scroll_height: 1000.0,
            body_offset_height: 900.0,
            document_client_height: 800.0,
            // The tallest measurement wins: scrollable = 2000 - 800.
            document_scroll_height: 2000.0,
            document_offset_height: 950.0,
        };
        f.tracker.on_scroll(&geometry);
        assert_eq!(f.tracker.samples()[0].scroll_percentage, 50.0);
    }
}
