//! Hover instrumentation.
//!
//! Maintains a debounced enter/exit state machine per tracked element. A raw
//! pointer signal schedules a committed state change one debounce window
//! later; any signal for the same element during that window cancels the
//! pending change first, so an enter immediately followed by a leave commits
//! nothing. Signals that would not change the committed state are ignored.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::delivery::EventSink;
use crate::events::{Event, EventType};
use crate::traits::Clock;

#[derive(Debug, Clone, Copy)]
struct Pending {
    /// Committed hover state once the deadline elapses.
    hovered: bool,
    deadline_ms: u64,
}

#[derive(Debug)]
struct ElementState {
    class: String,
    hovered: bool,
    pending: Option<Pending>,
}

/// Tracks debounced hover state for a set of elements.
///
/// Raw signals arrive through [`pointer_enter`] / [`pointer_leave`];
/// committed transitions happen in [`poll`], driven by the injected clock.
/// Confirmed transitions are appended to an in-memory hover log (a local
/// audit trail, never transmitted) and emitted as `hoverIn` / `hoverOut`
/// events.
///
/// [`pointer_enter`]: HoverTracker::pointer_enter
/// [`pointer_leave`]: HoverTracker::pointer_leave
/// [`poll`]: HoverTracker::poll
pub struct HoverTracker {
    elements: BTreeMap<String, ElementState>,
    debounce_ms: u64,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
    log: Vec<Event>,
}

impl HoverTracker {
    /// Create a tracker with the given debounce window.
    pub fn new(clock: Arc<dyn Clock>, sink: Arc<dyn EventSink>, debounce_ms: u64) -> Self {
        Self {
            elements: BTreeMap::new(),
            debounce_ms,
            clock,
            sink,
            log: Vec::new(),
        }
    }

    /// Register a trackable element under a stable key, starting unhovered.
    ///
    /// `class` is the element's class attribute, carried as event data.
    pub fn register(&mut self, key: impl Into<String>, class: impl Into<String>) {
        self.elements.insert(
            key.into(),
            ElementState {
                class: class.into(),
                hovered: false,
                pending: None,
            },
        );
    }

    /// Raw pointer-enter signal for an element.
    pub fn pointer_enter(&mut self, key: &str) {
        let now_ms = self.clock.now_millis();
        let debounce_ms = self.debounce_ms;
        let Some(state) = self.elements.get_mut(key) else {
            return;
        };
        state.pending = None;
        if !state.hovered {
            state.pending = Some(Pending {
                hovered: true,
                deadline_ms: now_ms + debounce_ms,
            });
        }
    }

    /// Raw pointer-leave signal for an element.
    pub fn pointer_leave(&mut self, key: &str) {
        let now_ms = self.clock.now_millis();
        let debounce_ms = self.debounce_ms;
        let Some(state) = self.elements.get_mut(key) else {
            return;
        };
        state.pending = None;
        if state.hovered {
            state.pending = Some(Pending {
                hovered: false,
                deadline_ms: now_ms + debounce_ms,
            });
        }
    }

    /// Commit every pending transition whose debounce window has elapsed.
    pub fn poll(&mut self) {
        let now_ms = self.clock.now_millis();
        let at = self.clock.now_utc();
        let mut committed = Vec::new();

        for state in self.elements.values_mut() {
            let Some(pending) = state.pending else {
                continue;
            };
            if now_ms < pending.deadline_ms {
                continue;
            }
            state.pending = None;
            state.hovered = pending.hovered;
            let event_type = if pending.hovered {
                EventType::HoverIn
            } else {
                EventType::HoverOut
            };
            committed.push(Event::new(event_type, at, state.class.clone()));
        }

        for event in committed {
            self.log.push(event.clone());
            self.sink.emit(event);
        }
    }

    /// Committed hover state of an element, or `None` if unregistered.
    pub fn is_hovered(&self, key: &str) -> Option<bool> {
        self.elements.get(key).map(|state| state.hovered)
    }

    /// The page-lifetime log of confirmed transitions.
    pub fn hover_log(&self) -> &[Event] {
        &self.log
    }
}
