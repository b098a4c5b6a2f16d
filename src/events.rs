//! Wire records sent to the collector.
//!
//! Every instrumented interaction funnels into the single [`Event`] shape;
//! the `device` and `essential` channels carry [`DeviceProfile`] and
//! [`EssentialPayload`]. All payloads serialize camelCase to match the
//! collector's JSON contract.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Kind of instrumented interaction an [`Event`] describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// A tracked element was clicked.
    ButtonClick,
    /// The running inter-click latency average was updated.
    AvgClickDist,
    /// A debounce-confirmed hover enter.
    HoverIn,
    /// A debounce-confirmed hover exit.
    HoverOut,
    /// A throttled scroll depth sample.
    ScrollDepth,
}

/// A single interaction observation, posted to the `event` channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// What kind of interaction was observed.
    pub event_type: EventType,
    /// ISO-8601 timestamp taken when the observation was committed.
    pub timestamp: String,
    /// Interaction detail: element class attribute, formatted average, or
    /// formatted scroll percentage.
    pub event_data: String,
}

impl Event {
    /// Build an event stamped at `observed_at`.
    pub fn new(event_type: EventType, observed_at: DateTime<Utc>, event_data: impl Into<String>) -> Self {
        Self {
            event_type,
            timestamp: format_timestamp(observed_at),
            event_data: event_data.into(),
        }
    }
}

/// Format a timestamp the way the collector expects it (millisecond
/// precision, `Z` suffix).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One-time device profile, posted to the `device` channel when an identity
/// is first minted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub browser_language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub screen_pixel_depth: u32,
    pub screen_color_depth: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// Offset from UTC in minutes, as the host environment reports it.
    pub timezone_offset: i32,
    pub platform: String,
    pub cookies_enabled: bool,
    pub supports_touch: bool,
    pub prefers_dark_scheme: bool,
}

/// Per-page-load payload, posted to the `essential` channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EssentialPayload {
    /// The persisted anonymous identity, or an empty string when unresolved.
    pub anonymous_id: String,
    /// Traffic source label, `"direct"` when no `utm_source` was present.
    pub source: String,
    pub page_count: u32,
    pub visit_count: u32,
    pub host: String,
    pub path: String,
}
