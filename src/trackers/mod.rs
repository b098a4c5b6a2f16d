//! Interaction instrumentation.
//!
//! Three independent sub-trackers over the host-provided element set and
//! injected time source: clicks (with the running inter-click average),
//! debounced hover enter/exit, and throttled scroll depth.

mod click;
mod hover;
mod scroll;

pub use click::{ClickTracker, AVG_CLICK_DIST_KEY};
pub use hover::HoverTracker;
pub use scroll::{ScrollSample, ScrollTracker};
