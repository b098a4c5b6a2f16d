//! Collector transport trait abstraction.
//!
//! Provides a trait-based abstraction for submitting serialized payloads to
//! the collector endpoint, enabling dependency injection and mocking in
//! tests.

use async_trait::async_trait;

/// Transport errors.
#[derive(Debug, Clone)]
pub enum TransportError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Collector returned a non-success status
    HttpStatus { status: u16 },
    /// Payload could not be serialized
    Serialization(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            TransportError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            TransportError::HttpStatus { status } => {
                write!(f, "Collector returned status {}", status)
            }
            TransportError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            TransportError::Other(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Trait for posting serialized payloads to the collector.
///
/// Implementations post `body` as JSON to `url` and map any non-2xx response
/// to [`TransportError::HttpStatus`]. The production implementation is
/// [`ReqwestTransport`](crate::adapters::ReqwestTransport); tests use the
/// recording mock.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to the given URL.
    async fn post(&self, url: &str, body: &str) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            TransportError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            TransportError::Timeout("30s".to_string()).to_string(),
            "Request timeout: 30s"
        );
        assert_eq!(
            TransportError::HttpStatus { status: 500 }.to_string(),
            "Collector returned status 500"
        );
        assert_eq!(
            TransportError::Serialization("bad value".to_string()).to_string(),
            "Serialization error: bad value"
        );
        assert_eq!(
            TransportError::Other("unknown".to_string()).to_string(),
            "Transport error: unknown"
        );
    }

    #[test]
    fn test_transport_error_clone() {
        let err = TransportError::HttpStatus { status: 404 };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
