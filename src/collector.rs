//! Page-load wiring.
//!
//! [`Collector`] holds the injected collaborators; [`Collector::page_load`]
//! runs the once-per-load sequence (identity resolution, counters, the
//! `essential` emission) and hands back the wired interaction trackers for
//! the lifetime of the page.

use std::sync::Arc;

use crate::config::CollectorConfig;
use crate::delivery::{Channel, DeliveryClient, EventSink};
use crate::events::DeviceProfile;
use crate::identity::{AnonymousIdentity, IdentityResolver, ANONYMOUS_ID_KEY};
use crate::page::PageContext;
use crate::session::{SessionCounter, SessionState};
use crate::trackers::{ClickTracker, HoverTracker, ScrollTracker};
use crate::traits::{Clock, Transport, VisitorStore};

/// The telemetry collector: configuration plus injected collaborators.
pub struct Collector {
    config: CollectorConfig,
    store: Arc<dyn VisitorStore>,
    clock: Arc<dyn Clock>,
    delivery: DeliveryClient,
}

/// Everything a page needs after load: the resolved state and the three
/// trackers, already wired to the delivery client.
pub struct PageInstrumentation {
    /// The resolved identity, `None` when resolution degraded.
    pub identity: Option<AnonymousIdentity>,
    /// This load's counters and traffic source.
    pub session: SessionState,
    pub clicks: ClickTracker,
    pub hovers: HoverTracker,
    pub scroll: ScrollTracker,
}

impl Collector {
    /// Create a collector from configuration and injected collaborators.
    pub fn new(
        config: CollectorConfig,
        store: Arc<dyn VisitorStore>,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let delivery = DeliveryClient::new(config.base_url.clone(), transport);
        Self {
            config,
            store,
            clock,
            delivery,
        }
    }

    /// The delivery client this collector posts through.
    pub fn delivery(&self) -> &DeliveryClient {
        &self.delivery
    }

    /// Run the page-load sequence and wire up instrumentation.
    ///
    /// Resolves the identity (minting on first visit), computes and persists
    /// the session counters, posts the `essential` payload, and constructs
    /// the trackers. Never fails: every degradation is logged and absorbed.
    pub async fn page_load(
        &self,
        page: &PageContext,
        profile: &DeviceProfile,
    ) -> PageInstrumentation {
        let resolver = IdentityResolver::new(self.store.clone(), self.clock.clone());
        let identity = resolver.resolve(&page.host, profile, &self.delivery).await;

        let counter = SessionCounter::new(self.store.clone());
        let session = counter.compute_and_persist(page);

        // The essential payload carries whatever identity is persisted at
        // this point, an empty string when unresolved.
        let anonymous_id = self
            .store
            .get(ANONYMOUS_ID_KEY)
            .ok()
            .flatten()
            .unwrap_or_default();
        let essential = session.essential_payload(&anonymous_id, page);
        self.delivery.send_logged(&essential, Channel::Essential).await;

        let sink: Arc<dyn EventSink> = Arc::new(self.delivery.clone());
        PageInstrumentation {
            identity,
            session,
            clicks: ClickTracker::new(self.store.clone(), self.clock.clone(), sink.clone()),
            hovers: HoverTracker::new(
                self.clock.clone(),
                sink.clone(),
                self.config.hover_debounce_ms,
            ),
            scroll: ScrollTracker::new(self.clock.clone(), sink, self.config.scroll_throttle_ms),
        }
    }
}
