//! Cancellable claim subscriptions.
//!
//! A subscription is a live registration for push-style updates to a
//! single proof key. The owning component is responsible for calling
//! [`SubscriptionGuard::cancel`] on both the digest-change and
//! teardown paths; dropping the guard cancels as well.

use poex_protocol::{Claim, Digest};
use tokio::sync::mpsc;

use crate::node::Node;

/// A live subscription to one digest's claim entry.
///
/// The current entry value is delivered immediately at subscription
/// time, then every change, in the order the node produces them.
pub struct ClaimSubscription {
    rx: mpsc::UnboundedReceiver<Option<Claim>>,
    guard: SubscriptionGuard,
}

impl ClaimSubscription {
    pub(crate) fn new(
        node: Node,
        digest: Digest,
        rx: mpsc::UnboundedReceiver<Option<Claim>>,
        id: u64,
    ) -> Self {
        Self {
            rx,
            guard: SubscriptionGuard {
                node,
                digest,
                id,
                cancelled: false,
            },
        }
    }

    /// The digest this subscription is keyed by.
    pub fn digest(&self) -> &Digest {
        &self.guard.digest
    }

    /// Receive the next entry emission.
    ///
    /// Returns `None` once the subscription has been cancelled and all
    /// buffered emissions have been drained.
    pub async fn recv(&mut self) -> Option<Option<Claim>> {
        self.rx.recv().await
    }

    /// Split into the emission receiver and the cancellation guard,
    /// so the receiver can be bridged into an event stream while the
    /// owner keeps the guard.
    pub fn into_parts(self) -> (mpsc::UnboundedReceiver<Option<Claim>>, SubscriptionGuard) {
        (self.rx, self.guard)
    }

    /// Cancel the subscription explicitly.
    pub fn cancel(&mut self) {
        self.guard.cancel();
    }
}

/// Handle that deregisters the watcher when cancelled or dropped.
pub struct SubscriptionGuard {
    node: Node,
    digest: Digest,
    id: u64,
    cancelled: bool,
}

impl SubscriptionGuard {
    /// Synchronously deregister the watcher. Idempotent.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.node.unsubscribe(&self.digest, self.id);
        }
    }

    /// The digest this guard's subscription is keyed by.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}
