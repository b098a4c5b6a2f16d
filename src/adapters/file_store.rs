//! JSON-file-backed visitor store.
//!
//! Durable entries are persisted to a JSON file under the visitor data
//! directory and survive process restarts; session entries live in memory
//! and vanish when the store is dropped, matching the session cookie
//! lifetime.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::traits::{Clock, Lifetime, StoreError, VisitorStore};

/// The visitor data directory name.
const DATA_DIR: &str = ".clickwire";

/// The durable store file name.
const STORE_FILE: &str = "visitor.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DurableEntry {
    value: String,
    /// Expiry as a Unix timestamp in seconds.
    expires_at: i64,
}

/// File-backed implementation of [`VisitorStore`].
pub struct FileStore {
    path: PathBuf,
    durable: Mutex<HashMap<String, DurableEntry>>,
    session: Mutex<HashMap<String, String>>,
    clock: Arc<dyn Clock>,
}

impl FileStore {
    /// Open (or create) a store at `path`.
    ///
    /// A missing or unreadable file starts the store empty rather than
    /// failing; a corrupt file is an error so stored identities are not
    /// silently discarded.
    pub fn open(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let path = path.into();
        let durable = if path.exists() {
            let file = File::open(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| StoreError::Serialization(e.to_string()))?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            durable: Mutex::new(durable),
            session: Mutex::new(HashMap::new()),
            clock,
        })
    }

    /// Open the store at the default location, `~/.clickwire/visitor.json`.
    pub fn open_default(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::Other("home directory not found".to_string()))?;
        Self::open(home.join(DATA_DIR).join(STORE_FILE), clock)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self, durable: &HashMap<String, DurableEntry>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let file = File::create(&self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, durable)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl VisitorStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        {
            let session = self
                .session
                .lock()
                .map_err(|e| StoreError::Other(e.to_string()))?;
            if let Some(value) = session.get(key) {
                return Ok(Some(value.clone()));
            }
        }

        let mut durable = self
            .durable
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        if let Some(entry) = durable.get(key) {
            if self.clock.now_utc().timestamp() >= entry.expires_at {
                durable.remove(key);
                self.persist(&durable)?;
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, lifetime: Lifetime) -> Result<(), StoreError> {
        match lifetime {
            Lifetime::Session => {
                let mut session = self
                    .session
                    .lock()
                    .map_err(|e| StoreError::Other(e.to_string()))?;
                session.insert(key.to_string(), value.to_string());
                // A session write shadows any durable value under the same key.
                Ok(())
            }
            Lifetime::Durable { days } => {
                let expires_at =
                    (self.clock.now_utc() + Duration::days(i64::from(days))).timestamp();
                let mut durable = self
                    .durable
                    .lock()
                    .map_err(|e| StoreError::Other(e.to_string()))?;
                durable.insert(
                    key.to_string(),
                    DurableEntry {
                        value: value.to_string(),
                        expires_at,
                    },
                );
                self.persist(&durable)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        {
            let mut session = self
                .session
                .lock()
                .map_err(|e| StoreError::Other(e.to_string()))?;
            session.remove(key);
        }
        let mut durable = self
            .durable
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        if durable.remove(key).is_some() {
            self.persist(&durable)?;
        }
        Ok(())
    }
}
