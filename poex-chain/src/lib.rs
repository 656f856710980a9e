//! In-process proof-of-existence node, client handle, and claim
//! subscription plumbing.

pub mod client;
pub mod error;
pub mod node;
pub mod subscription;
pub mod testing;
pub mod watcher;

pub use client::{ChainClient, TxStatus};
pub use error::ChainError;
pub use node::Node;
pub use subscription::{ClaimSubscription, SubscriptionGuard};
pub use watcher::ClaimWatcher;
