//! Visitor state persistence trait abstraction.
//!
//! Provides a key/value persistence capability with two lifetime classes,
//! standing in for the browser cookie jar: *session* entries clear when the
//! browsing session ends, *durable* entries survive for a fixed number of
//! days.

/// Lifetime class of a persisted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Cleared when the browsing session ends.
    Session,
    /// Survives across sessions until the expiry elapses.
    Durable {
        /// Days until the value expires.
        days: u32,
    },
}

/// Persistence operation errors.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Underlying storage could not be read or written
    Io(String),
    /// Stored data could not be serialized or deserialized
    Serialization(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "IO error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreError::Other(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for visitor state persistence.
///
/// Implementations must serialize access internally so that a caller's
/// read-modify-write of a counter key cannot interleave with another
/// mutation of the same key.
pub trait VisitorStore: Send + Sync {
    /// Read a value by key.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key is present and unexpired
    /// - `Ok(None)` if the key is absent or its durable expiry has elapsed
    /// - `Err(error)` if the read failed
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value under a key with the given lifetime.
    ///
    /// Overwrites any existing value and its lifetime.
    fn set(&self, key: &str, value: &str, lifetime: Lifetime) -> Result<(), StoreError>;

    /// Remove a value by key, regardless of lifetime class.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
