//! Shared types, digests, and call descriptions for poex.

pub mod call;
pub mod claim;
pub mod digest;
pub mod types;

pub use call::TxCall;
pub use claim::{Claim, ClaimStatus};
pub use digest::file_digest;
pub use types::{AccountId, Digest};
