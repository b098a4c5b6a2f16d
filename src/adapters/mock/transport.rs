//! Mock transport for testing.
//!
//! Records every POST for verification and can be configured to fail,
//! allowing tests to exercise delivery error paths without network access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{Transport, TransportError};

/// A recorded POST for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    /// Full request URL.
    pub url: String,
    /// JSON body as posted.
    pub body: String,
}

/// Mock [`Transport`] that records requests.
///
/// # Example
///
/// ```ignore
/// use clickwire::adapters::mock::MockTransport;
///
/// let transport = MockTransport::new();
/// // ... drive the code under test ...
/// let posts = transport.posts_to("/event");
/// assert_eq!(posts.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    posts: Arc<Mutex<Vec<RecordedPost>>>,
    failure: Arc<Mutex<Option<TransportError>>>,
}

impl MockTransport {
    /// Create a mock transport that accepts every POST.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent POST fail with `error`; `None` restores success.
    pub fn set_failure(&self, error: Option<TransportError>) {
        *self.failure.lock().unwrap() = error;
    }

    /// All recorded POSTs, in order.
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    /// Recorded POSTs whose URL ends with `suffix`.
    pub fn posts_to(&self, suffix: &str) -> Vec<RecordedPost> {
        self.posts()
            .into_iter()
            .filter(|post| post.url.ends_with(suffix))
            .collect()
    }

    /// Clear the recorded POSTs.
    pub fn clear_posts(&self) {
        self.posts.lock().unwrap().clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &str, body: &str) -> Result<(), TransportError> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            body: body.to_string(),
        });
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
