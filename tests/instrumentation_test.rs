//! Integration tests for the interaction trackers.
//!
//! Drives the click, hover, and scroll trackers through a recording sink
//! and the mock clock, checking the timing contracts end to end: the
//! running average recurrence, debounce cancellation, and the leading-edge
//! scroll throttle.

mod common;

use std::sync::Arc;

use clickwire::adapters::mock::RecordingSink;
use clickwire::events::EventType;
use clickwire::page::ScrollGeometry;
use clickwire::trackers::{ClickTracker, HoverTracker, ScrollTracker, AVG_CLICK_DIST_KEY};
use clickwire::traits::VisitorStore;

use common::{test_clock, test_store};

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
fn test_click_average_recurrence_composes() {
    let clock = test_clock();
    let store = test_store(&clock);
    let sink = RecordingSink::new();
    let mut tracker = ClickTracker::new(
        Arc::new(store.clone()),
        Arc::new(clock.clone()),
        Arc::new(sink.clone()),
    );

    // Gaps g1 = 400, g2 = 100 from a0 = 0: ((0+400)/2 + 100)/2 = 150,
    // not (0+400+100)/3.
    clock.advance_ms(400);
    tracker.record_click("product-form__submit");
    clock.advance_ms(100);
    tracker.record_click("cart__checkout-button");

    assert_eq!(tracker.average_ms(), 150.0);
    assert_eq!(store.get(AVG_CLICK_DIST_KEY).unwrap(), Some("150".to_string()));

    // Each click produced an ordered buttonClick / avgClickDist pair.
    let events = sink.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].event_type, EventType::ButtonClick);
    assert_eq!(events[1].event_type, EventType::AvgClickDist);
    assert_eq!(events[2].event_type, EventType::ButtonClick);
    assert_eq!(events[3].event_type, EventType::AvgClickDist);
    assert_eq!(events[3].event_data, "150");
}

#[test]
fn test_click_average_survives_page_reload() {
    let clock = test_clock();
    let store = test_store(&clock);
    let sink = RecordingSink::new();

    let mut tracker = ClickTracker::new(
        Arc::new(store.clone()),
        Arc::new(clock.clone()),
        Arc::new(sink.clone()),
    );
    clock.advance_ms(300);
    tracker.record_click("a");
    assert_eq!(tracker.average_ms(), 150.0);

    // A new page load constructs a fresh tracker over the same store.
    let reloaded = ClickTracker::new(
        Arc::new(store),
        Arc::new(clock),
        Arc::new(sink),
    );
    assert_eq!(reloaded.average_ms(), 150.0);
}

#[test]
fn test_hover_debounce_cancellation_emits_nothing() {
    let clock = test_clock();
    let sink = RecordingSink::new();
    let mut tracker = HoverTracker::new(Arc::new(clock.clone()), Arc::new(sink.clone()), 300);
    tracker.register("media", "grid__item product__media-wrapper");

    // Enter immediately followed by leave within the debounce window.
    tracker.pointer_enter("media");
    clock.advance_ms(150);
    tracker.pointer_leave("media");
    clock.advance_ms(2000);
    tracker.poll();

    assert!(sink.events().is_empty());
    assert_eq!(tracker.is_hovered("media"), Some(false));
    assert!(tracker.hover_log().is_empty());
}

#[test]
fn test_hover_dwell_emits_in_and_out() {
    let clock = test_clock();
    let sink = RecordingSink::new();
    let mut tracker = HoverTracker::new(Arc::new(clock.clone()), Arc::new(sink.clone()), 300);
    tracker.register("info", "product__info-wrapper");

    tracker.pointer_enter("info");
    clock.advance_ms(300);
    tracker.poll();
    clock.advance_ms(1200);
    tracker.pointer_leave("info");
    clock.advance_ms(300);
    tracker.poll();

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, EventType::HoverIn);
    assert_eq!(events[0].event_data, "product__info-wrapper");
    assert_eq!(events[1].event_type, EventType::HoverOut);
    assert_eq!(tracker.hover_log().len(), 2);
}

#[test]
fn test_scroll_throttle_drops_burst() {
    let clock = test_clock();
    let sink = RecordingSink::new();
    let mut tracker = ScrollTracker::new(Arc::new(clock.clone()), Arc::new(sink.clone()), 5000);

    // Ten signals within one second: exactly one sample.
    for i in 0..10 {
        tracker.on_scroll(&geometry_at(200.0 * f64::from(i)));
        clock.advance_ms(100);
    }
    assert_eq!(tracker.samples().len(), 1);
    assert_eq!(sink.events().len(), 1);

    // One more signal 5001 ms after the recorded sample: a new emission.
    clock.advance_ms(4001);
    tracker.on_scroll(&geometry_at(1000.0));
    assert_eq!(tracker.samples().len(), 2);
    assert_eq!(sink.events().len(), 2);
    assert_eq!(sink.events()[1].event_data, "50");
}
