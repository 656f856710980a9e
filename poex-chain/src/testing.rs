//! Shared test utilities for poex tests.

use std::time::Duration;

use poex_protocol::{AccountId, Claim, Digest, TxCall};
use tokio::sync::mpsc;

use crate::client::{ChainClient, TxStatus};
use crate::node::Node;

/// Timeout for receiving an expected claim emission.
pub const EMISSION_TIMEOUT_SECS: u64 = 5;

/// Initialise a tracing subscriber for tests.
///
/// Respects the `RUST_LOG` environment variable, defaults to `debug`.
/// Uses `with_test_writer()` to integrate with `cargo test` output
/// capture. Safe to call multiple times.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// A node together with a client handle on it.
pub fn node_and_client() -> (Node, ChainClient) {
    let node = Node::new();
    let client = ChainClient::new(node.clone());
    (node, client)
}

/// A node that already holds a claim on `digest` by `owner`.
pub fn claimed_node(digest: &Digest, owner: &AccountId) -> (Node, ChainClient) {
    let (node, client) = node_and_client();
    node.apply(&TxCall::create_claim(digest), owner)
        .expect("seed claim failed");
    (node, client)
}

/// Receive the next claim emission, panicking on timeout.
pub async fn recv_entry(rx: &mut mpsc::UnboundedReceiver<Option<Claim>>) -> Option<Claim> {
    tokio::time::timeout(Duration::from_secs(EMISSION_TIMEOUT_SECS), rx.recv())
        .await
        .expect("timed out waiting for claim emission")
        .expect("claim subscription closed unexpectedly")
}

/// Drain a transaction status stream to completion.
pub async fn collect_statuses(mut rx: mpsc::UnboundedReceiver<TxStatus>) -> Vec<TxStatus> {
    let mut out = Vec::new();
    while let Some(status) = rx.recv().await {
        out.push(status);
    }
    out
}
