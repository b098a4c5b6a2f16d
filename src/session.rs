//! Session and visit counters.
//!
//! Computes the per-page-load counters: the session-scoped page count, the
//! durable visit count, and the traffic source label. The visit count only
//! moves when the session page counter is absent, which is how a new
//! browsing session is detected.

use std::sync::Arc;

use crate::config::DURABLE_TTL_DAYS;
use crate::events::EssentialPayload;
use crate::page::PageContext;
use crate::traits::{Lifetime, VisitorStore};

/// Session key holding the page count.
pub const PAGE_COUNT_KEY: &str = "page_count";

/// Durable key holding the visit count.
pub const VISIT_COUNT_KEY: &str = "visit_count";

/// Session key holding the traffic source label.
pub const SOURCE_KEY: &str = "source";

/// Source label used when no `utm_source` parameter is present.
pub const DIRECT_SOURCE: &str = "direct";

/// Counters and traffic source for the current page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Pages loaded this session, including this one.
    pub page_count: u32,
    /// Visits recorded over the durable store's lifetime, including this one.
    pub visit_count: u32,
    /// Traffic source label for this session.
    pub source: String,
}

impl SessionState {
    /// Build the per-page-load `essential` payload.
    pub fn essential_payload(&self, anonymous_id: &str, page: &PageContext) -> EssentialPayload {
        EssentialPayload {
            anonymous_id: anonymous_id.to_string(),
            source: self.source.clone(),
            page_count: self.page_count,
            visit_count: self.visit_count,
            host: page.host.clone(),
            path: page.path.clone(),
        }
    }
}

/// Computes and persists the session/visit counters once per page load.
pub struct SessionCounter {
    store: Arc<dyn VisitorStore>,
}

impl SessionCounter {
    /// Create a counter over the given store.
    pub fn new(store: Arc<dyn VisitorStore>) -> Self {
        Self { store }
    }

    /// Compute this load's counters and write them back.
    ///
    /// The page count increments on every load and lives session-scoped. The
    /// visit count increments only when the session page counter was absent,
    /// and is always re-persisted with a fresh durable expiry. Store errors
    /// degrade to the computed in-memory values; the page is never broken.
    pub fn compute_and_persist(&self, page: &PageContext) -> SessionState {
        let previous_page_count = self.read_counter(PAGE_COUNT_KEY);
        let previous_visit_count = self.read_counter(VISIT_COUNT_KEY);

        let page_count = match previous_page_count {
            Some(count) => count + 1,
            None => 1,
        };
        let visit_count = match (previous_page_count, previous_visit_count) {
            // Session already underway: hold the visit count.
            (Some(_), Some(visits)) => visits,
            (Some(_), None) => 1,
            // First page of a session: a new visit begins.
            (None, Some(visits)) => visits + 1,
            (None, None) => 1,
        };
        let source = page
            .utm_source()
            .filter(|source| !source.is_empty())
            .unwrap_or_else(|| DIRECT_SOURCE.to_string());

        self.write(PAGE_COUNT_KEY, &page_count.to_string(), Lifetime::Session);
        self.write(
            VISIT_COUNT_KEY,
            &visit_count.to_string(),
            Lifetime::Durable { days: DURABLE_TTL_DAYS },
        );
        self.write(SOURCE_KEY, &source, Lifetime::Session);

        SessionState {
            page_count,
            visit_count,
            source,
        }
    }

    fn read_counter(&self, key: &str) -> Option<u32> {
        match self.store.get(key) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                tracing::warn!("counter read for {} failed, treating as absent: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str, lifetime: Lifetime) {
        if let Err(e) = self.store.set(key, value, lifetime) {
            tracing::warn!("counter write for {} failed: {}", key, e);
        }
    }
}
