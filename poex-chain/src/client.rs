//! Cloneable client handle over an in-process node.

use poex_protocol::{AccountId, Digest, TxCall};
use tokio::sync::mpsc;

use crate::error::ChainError;
use crate::node::Node;
use crate::subscription::ClaimSubscription;

/// Lifecycle updates for a submitted transaction.
///
/// The UI displays the rendered form of each update verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    Sending,
    InBlock(u64),
    Failed(String),
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sending => write!(f, "Sending transaction..."),
            Self::InBlock(block) => write!(f, "Included at block {block}"),
            Self::Failed(reason) => write!(f, "Transaction failed: {reason}"),
        }
    }
}

/// Handle for querying and transacting against a node. Cheap to clone.
#[derive(Clone)]
pub struct ChainClient {
    node: Node,
}

impl ChainClient {
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// Feature probe: whether the node's schema exposes the proofs
    /// query the claim watcher depends on. Checked once at
    /// composition time.
    pub fn supports_proof_queries(&self) -> bool {
        self.node.supports_proof_queries()
    }

    /// The current best block number.
    pub fn best_block(&self) -> u64 {
        self.node.best_block()
    }

    /// Subscribe to the claim entry for a digest.
    pub fn subscribe_claims(&self, digest: &Digest) -> Result<ClaimSubscription, ChainError> {
        let (rx, id) = self.node.subscribe(digest)?;
        tracing::debug!(digest = %digest, "subscribed to claim entry");
        Ok(ClaimSubscription::new(self.node.clone(), *digest, rx, id))
    }

    /// Submit a signed transaction and return its status stream.
    ///
    /// The stream carries `Sending` followed by either `InBlock` or
    /// `Failed`; there is no retry.
    pub fn submit_signed(
        &self,
        call: TxCall,
        signer: &AccountId,
    ) -> mpsc::UnboundedReceiver<TxStatus> {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(TxStatus::Sending);

        tracing::info!(
            pallet = %call.pallet,
            call = %call.call,
            signer = %signer,
            "submitting signed transaction"
        );

        match self.node.apply(&call, signer) {
            Ok(block) => {
                let _ = tx.send(TxStatus::InBlock(block));
            }
            Err(e) => {
                tracing::warn!(error = %e, "transaction dispatch failed");
                let _ = tx.send(TxStatus::Failed(e.to_string()));
            }
        }

        rx
    }
}
