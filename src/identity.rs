//! Anonymous identity resolution.
//!
//! Resolves the visitor's durable anonymous identifier: the persisted value
//! when one exists, otherwise a freshly minted `<host><sha1-hex>` written
//! with a 365-day expiry. Minting also reports the device profile to the
//! collector, once per device.

use sha1::{Digest, Sha1};
use std::sync::Arc;

use crate::config::DURABLE_TTL_DAYS;
use crate::delivery::{Channel, DeliveryClient};
use crate::events::{format_timestamp, DeviceProfile};
use crate::traits::{Clock, Lifetime, VisitorStore};

/// Durable key holding the anonymous identity.
pub const ANONYMOUS_ID_KEY: &str = "anonymous_id";

/// A device/browser-scoped pseudonymous identifier, stable once minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousIdentity {
    value: String,
}

impl AnonymousIdentity {
    /// The identifier string, `<host><hex-digest>`.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for AnonymousIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Resolves or mints the anonymous visitor identity.
pub struct IdentityResolver {
    store: Arc<dyn VisitorStore>,
    clock: Arc<dyn Clock>,
}

impl IdentityResolver {
    /// Create a resolver over the given store and clock.
    pub fn new(store: Arc<dyn VisitorStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Resolve the identity for this page load.
    ///
    /// The persisted fast path performs no writes and no emissions. The
    /// minting path performs exactly one durable write and posts the device
    /// profile to the `device` channel. A store read failure leaves the
    /// identity unresolved for this load; nothing is retried and nothing
    /// reaches the page.
    pub async fn resolve(
        &self,
        host: &str,
        profile: &DeviceProfile,
        delivery: &DeliveryClient,
    ) -> Option<AnonymousIdentity> {
        match self.store.get(ANONYMOUS_ID_KEY) {
            Ok(Some(value)) => return Some(AnonymousIdentity { value }),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("identity read failed, leaving unresolved: {}", e);
                return None;
            }
        }

        // First-ever visit: report the device profile, then mint.
        delivery.send_logged(profile, Channel::Device).await;

        let seed = format_timestamp(self.clock.now_utc());
        let digest = Sha1::digest(seed.as_bytes());
        let value = format!("{}{}", host, hex::encode(digest));

        if let Err(e) = self.store.set(
            ANONYMOUS_ID_KEY,
            &value,
            Lifetime::Durable { days: DURABLE_TTL_DAYS },
        ) {
            tracing::warn!("identity write failed, id will be re-minted next load: {}", e);
        }
        Some(AnonymousIdentity { value })
    }
}
