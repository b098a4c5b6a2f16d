//! Collector configuration.
//!
//! Holds the collector endpoint and the timing windows used by the
//! interaction trackers. Values default to the production constants and can
//! be overridden for testing or alternate deployments.

/// Default collector base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default hover debounce window in milliseconds.
pub const DEFAULT_HOVER_DEBOUNCE_MS: u64 = 300;

/// Default scroll throttle window in milliseconds.
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 5000;

/// Expiry applied to every durable persistence key, in days.
pub const DURABLE_TTL_DAYS: u32 = 365;

/// Configuration for the telemetry collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Base URL of the collector endpoint; channels are appended as path segments.
    pub base_url: String,
    /// Delay between a raw pointer signal and a committed hover state change.
    pub hover_debounce_ms: u64,
    /// Minimum interval between recorded scroll depth samples.
    pub scroll_throttle_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hover_debounce_ms: DEFAULT_HOVER_DEBOUNCE_MS,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
        }
    }
}

impl CollectorConfig {
    /// Create a config pointing at a custom collector base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the hover debounce window.
    pub fn hover_debounce_ms(mut self, ms: u64) -> Self {
        self.hover_debounce_ms = ms;
        self
    }

    /// Override the scroll throttle window.
    pub fn scroll_throttle_ms(mut self, ms: u64) -> Self {
        self.scroll_throttle_ms = ms;
        self
    }
}
