//! Common test utilities for integration tests.
//!
//! Provides reusable fixtures: a standard mock clock origin, test page and
//! device-profile values, and a store wrapper that counts writes for
//! verifying write-exactly-once properties.

use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clickwire::adapters::mock::MockClock;
use clickwire::adapters::MemoryStore;
use clickwire::events::DeviceProfile;
use clickwire::page::PageContext;
use clickwire::traits::{Lifetime, StoreError, VisitorStore};

/// Install a fmt subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A mock clock starting at a fixed, readable origin.
pub fn test_clock() -> MockClock {
    MockClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
}

/// A memory store sharing the given clock.
pub fn test_store(clock: &MockClock) -> MemoryStore {
    MemoryStore::new(Arc::new(clock.clone()))
}

/// A page context with no query parameters.
pub fn direct_page() -> PageContext {
    PageContext::new("shop.example.com", "/products/tee", "")
}

/// A representative device profile.
pub fn test_profile() -> DeviceProfile {
    DeviceProfile {
        browser_language: "en-US".to_string(),
        screen_width: 1920,
        screen_height: 1080,
        screen_pixel_depth: 24,
        screen_color_depth: 24,
        window_width: 1200,
        window_height: 800,
        timezone_offset: -60,
        platform: "MacIntel".to_string(),
        cookies_enabled: true,
        supports_touch: false,
        prefers_dark_scheme: true,
    }
}

/// Store wrapper that counts `set` calls, for write-exactly-once assertions.
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `set` calls observed so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl VisitorStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str, lifetime: Lifetime) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, lifetime)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}
