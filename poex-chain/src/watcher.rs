//! Claim watcher: maintains at most one live claim subscription.

use poex_protocol::{Claim, Digest};
use tokio::sync::mpsc;

use crate::client::ChainClient;
use crate::subscription::SubscriptionGuard;

/// Owns the subscription for the currently watched digest.
///
/// Retargeting tears the previous subscription down synchronously
/// before establishing the next, so at most one subscription is live
/// at any time and no emission from a stale digest can originate
/// after its teardown.
pub struct ClaimWatcher {
    client: ChainClient,
    live: Option<SubscriptionGuard>,
}

impl ClaimWatcher {
    pub fn new(client: ChainClient) -> Self {
        Self { client, live: None }
    }

    /// The digest of the live subscription, if any.
    pub fn live_digest(&self) -> Option<&Digest> {
        self.live.as_ref().map(|guard| guard.digest())
    }

    /// Point the watcher at a new digest.
    ///
    /// Cancels any previous subscription first. For a non-null digest,
    /// establishes exactly one new subscription and returns its
    /// emission receiver for the caller to bridge into its event loop.
    /// A failed subscribe is logged and yields no receiver: claim
    /// state simply stops updating.
    pub fn retarget(
        &mut self,
        digest: Option<Digest>,
    ) -> Option<mpsc::UnboundedReceiver<Option<Claim>>> {
        if let Some(mut old) = self.live.take() {
            tracing::debug!(digest = %old.digest(), "cancelling previous claim subscription");
            old.cancel();
        }

        let digest = digest?;
        match self.client.subscribe_claims(&digest) {
            Ok(sub) => {
                let (rx, guard) = sub.into_parts();
                self.live = Some(guard);
                Some(rx)
            }
            Err(e) => {
                tracing::warn!(digest = %digest, error = %e, "claim subscription failed");
                None
            }
        }
    }
}
