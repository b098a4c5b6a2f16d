//! Delivery client for the collector endpoint.
//!
//! Serializes payloads and posts them to `<base-url>/<channel>`. Delivery is
//! fire-and-forget at the instrumentation boundary: failures are logged
//! locally and never surfaced to the page. The typed error from [`send`]
//! stays observable so a queueing or retrying sender can be layered on
//! without touching tracker logic.
//!
//! [`send`]: DeliveryClient::send

use serde::Serialize;
use std::sync::Arc;

use crate::events::Event;
use crate::traits::{Transport, TransportError};

/// Collector channel a payload is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// One-time device profile.
    Device,
    /// Per-page-load essentials.
    Essential,
    /// Per-interaction events.
    Event,
}

impl Channel {
    /// The channel's URL path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Device => "device",
            Channel::Essential => "essential",
            Channel::Event => "event",
        }
    }
}

/// Capability to emit an interaction event.
///
/// Each tracker holds a sink rather than wiring itself to the network,
/// so tests can swap in a recording sink and assert on emissions.
pub trait EventSink: Send + Sync {
    /// Emit one interaction event. Must not block the caller.
    fn emit(&self, event: Event);
}

/// Client for submitting payloads to the collector.
#[derive(Clone)]
pub struct DeliveryClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl DeliveryClient {
    /// Create a client posting to `base_url` over `transport`.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// The full URL for a channel.
    pub fn endpoint(&self, channel: Channel) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), channel.as_str())
    }

    /// Serialize `payload` and post it to `channel`.
    ///
    /// Failure is returned to the caller, who decides whether to swallow it;
    /// nothing is retried or queued.
    pub async fn send<T: Serialize>(
        &self,
        payload: &T,
        channel: Channel,
    ) -> Result<(), TransportError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;
        self.transport.post(&self.endpoint(channel), &body).await
    }

    /// Send and swallow the outcome, logging it locally.
    pub async fn send_logged<T: Serialize>(&self, payload: &T, channel: Channel) {
        match self.send(payload, channel).await {
            Ok(()) => tracing::debug!("delivered payload to {} channel", channel.as_str()),
            Err(e) => tracing::warn!("failed to deliver to {} channel: {}", channel.as_str(), e),
        }
    }
}

impl EventSink for DeliveryClient {
    /// Spawn the delivery so the interaction handler never waits on the
    /// network. Requires a running tokio runtime.
    fn emit(&self, event: Event) {
        let client = self.clone();
        tokio::spawn(async move {
            client.send_logged(&event, Channel::Event).await;
        });
    }
}
