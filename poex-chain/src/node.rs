//! In-process proof-of-existence node.
//!
//! Claims are stored in a map keyed by the proof argument (the digest
//! hex string), each value holding the owning account and the block
//! number at which it was recorded. Every applied extrinsic advances
//! the block counter by one. Live watchers on a proof key are notified
//! with the new entry value after each mutation of that key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use poex_protocol::call::POE_PALLET;
use poex_protocol::{AccountId, Claim, Digest, TxCall};
use tokio::sync::mpsc;

use crate::error::ChainError;

/// A registered claim watcher: its registration id and the channel
/// that delivers entry emissions.
struct Watcher {
    id: u64,
    tx: mpsc::UnboundedSender<Option<Claim>>,
}

/// Mutable chain state, guarded by one lock so that subscribe,
/// unsubscribe, and dispatch are each atomic with respect to the
/// watcher lists. Emissions are therefore delivered in the order the
/// node produces them.
struct NodeState {
    best_block: u64,
    proofs: HashMap<String, Claim>,
    watchers: HashMap<String, Vec<Watcher>>,
    next_watcher_id: u64,
}

struct NodeInner {
    proofs_query_exposed: bool,
    state: Mutex<NodeState>,
}

/// Handle to an in-process proof-of-existence node. Cheap to clone.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

impl Node {
    /// Create a node with the proofs query exposed.
    pub fn new() -> Self {
        Self::with_capabilities(true)
    }

    /// Create a node whose schema does not expose the proofs query.
    ///
    /// Subscriptions against such a node fail with
    /// [`ChainError::ProofQueriesUnavailable`]; the app's capability
    /// probe detects this at composition time.
    pub fn without_proof_queries() -> Self {
        Self::with_capabilities(false)
    }

    fn with_capabilities(proofs_query_exposed: bool) -> Self {
        tracing::info!(proofs_query_exposed, "node started");
        Self {
            inner: Arc::new(NodeInner {
                proofs_query_exposed,
                state: Mutex::new(NodeState {
                    best_block: 0,
                    proofs: HashMap::new(),
                    watchers: HashMap::new(),
                    next_watcher_id: 0,
                }),
            }),
        }
    }

    /// Whether the node's schema exposes the proofs query.
    pub fn supports_proof_queries(&self) -> bool {
        self.inner.proofs_query_exposed
    }

    /// The current best block number.
    pub fn best_block(&self) -> u64 {
        self.inner.state.lock().unwrap().best_block
    }

    /// The claim entry currently stored for a digest, if any.
    pub fn claim(&self, digest: &Digest) -> Option<Claim> {
        self.inner
            .state
            .lock()
            .unwrap()
            .proofs
            .get(&digest.to_hex())
            .cloned()
    }

    /// Number of live claim watchers registered for a digest.
    pub fn watcher_count(&self, digest: &Digest) -> usize {
        self.inner
            .state
            .lock()
            .unwrap()
            .watchers
            .get(&digest.to_hex())
            .map_or(0, |w| w.len())
    }

    /// Apply a signed extrinsic, returning the block it landed in.
    ///
    /// Dispatch mirrors the proof-of-existence pallet: `create_claim`
    /// fails if the proof exists, `revoke_claim` fails if it does not
    /// exist or is owned by another account. Watchers of the touched
    /// proof key are notified with the new entry value.
    pub fn apply(&self, call: &TxCall, signer: &AccountId) -> Result<u64, ChainError> {
        if call.pallet != POE_PALLET {
            return Err(ChainError::UnknownCall {
                pallet: call.pallet.clone(),
                call: call.call.clone(),
            });
        }
        let proof = call
            .params
            .first()
            .ok_or(ChainError::MissingProofArgument)?
            .clone();

        let mut state = self.inner.state.lock().unwrap();
        state.best_block += 1;
        let block = state.best_block;

        match call.call.as_str() {
            "create_claim" => {
                if state.proofs.contains_key(&proof) {
                    return Err(ChainError::AlreadyClaimed);
                }
                let claim = Claim {
                    owner: signer.clone(),
                    block,
                };
                tracing::info!(proof = %proof, owner = %signer, block, "claim created");
                state.proofs.insert(proof.clone(), claim.clone());
                Self::notify(&mut state, &proof, Some(claim));
            }
            "revoke_claim" => {
                let owner = state
                    .proofs
                    .get(&proof)
                    .ok_or(ChainError::NoSuchProof)?
                    .owner
                    .clone();
                if owner != *signer {
                    return Err(ChainError::NotOwner);
                }
                tracing::info!(proof = %proof, owner = %signer, block, "claim revoked");
                state.proofs.remove(&proof);
                Self::notify(&mut state, &proof, None);
            }
            _ => {
                return Err(ChainError::UnknownCall {
                    pallet: call.pallet.clone(),
                    call: call.call.clone(),
                });
            }
        }

        Ok(block)
    }

    /// Register a watcher for a digest's claim entry.
    ///
    /// The current entry value is pushed immediately, then every
    /// subsequent change. Returns the receiver and the registration id
    /// used to unsubscribe.
    pub(crate) fn subscribe(
        &self,
        digest: &Digest,
    ) -> Result<(mpsc::UnboundedReceiver<Option<Claim>>, u64), ChainError> {
        if !self.inner.proofs_query_exposed {
            return Err(ChainError::ProofQueriesUnavailable);
        }

        let key = digest.to_hex();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut state = self.inner.state.lock().unwrap();
        let id = state.next_watcher_id;
        state.next_watcher_id += 1;

        // Initial value push at subscription time.
        let current = state.proofs.get(&key).cloned();
        let _ = tx.send(current);

        state.watchers.entry(key).or_default().push(Watcher { id, tx });
        tracing::debug!(digest = %digest, watcher_id = id, "claim watcher registered");

        Ok((rx, id))
    }

    /// Deregister a watcher. Idempotent: an unknown id is a no-op.
    pub(crate) fn unsubscribe(&self, digest: &Digest, id: u64) {
        let key = digest.to_hex();
        let mut state = self.inner.state.lock().unwrap();
        if let Some(watchers) = state.watchers.get_mut(&key) {
            watchers.retain(|w| w.id != id);
            if watchers.is_empty() {
                state.watchers.remove(&key);
            }
        }
        tracing::debug!(digest = %digest, watcher_id = id, "claim watcher deregistered");
    }

    /// Push an entry emission to every live watcher of a proof key,
    /// pruning watchers whose receiver is gone.
    fn notify(state: &mut NodeState, key: &str, entry: Option<Claim>) {
        if let Some(watchers) = state.watchers.get_mut(key) {
            watchers.retain(|w| w.tx.send(entry.clone()).is_ok());
            if watchers.is_empty() {
                state.watchers.remove(key);
            }
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
