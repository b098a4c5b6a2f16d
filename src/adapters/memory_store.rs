//! In-memory visitor store.
//!
//! Holds both lifetime classes in a mutex-guarded map: session entries clear
//! on [`MemoryStore::end_session`], durable entries expire against the
//! injected clock. This is the production analog of a browser cookie jar for
//! embeddings without their own persistence, and the primary test vehicle.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Clock, Lifetime, StoreError, VisitorStore};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` for session entries; durable entries carry their expiry.
    expires_at: Option<DateTime<Utc>>,
}

/// Mutex-guarded in-memory implementation of [`VisitorStore`].
///
/// Cloning shares the underlying map, so a clone observes writes made
/// through the original.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store evaluating durable expiry against `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Clear every session-scoped entry, as when the browsing session ends.
    ///
    /// Durable entries are untouched.
    pub fn end_session(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|_, entry| entry.expires_at.is_some());
        }
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        match entry.expires_at {
            Some(expires_at) => self.clock.now_utc() >= expires_at,
            None => false,
        }
    }
}

impl VisitorStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        if let Some(entry) = entries.get(key) {
            if self.is_expired(entry) {
                entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, lifetime: Lifetime) -> Result<(), StoreError> {
        let expires_at = match lifetime {
            Lifetime::Session => None,
            Lifetime::Durable { days } => {
                Some(self.clock.now_utc() + Duration::days(i64::from(days)))
            }
        };
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
