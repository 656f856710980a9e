//! Chain dispatch and query errors.

use thiserror::Error;

/// Errors returned by extrinsic dispatch and claim queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The proof has already been claimed.
    #[error("the proof has already been claimed")]
    AlreadyClaimed,

    /// The proof does not exist, so it cannot be revoked.
    #[error("no such proof exists")]
    NoSuchProof,

    /// The proof is claimed by another account.
    #[error("the proof is owned by another account")]
    NotOwner,

    /// The call targets a pallet or function the node does not expose.
    #[error("unknown call {pallet}::{call}")]
    UnknownCall { pallet: String, call: String },

    /// The call is missing its proof argument.
    #[error("call is missing the proof argument")]
    MissingProofArgument,

    /// The node does not expose the proofs query.
    #[error("proof queries are not available on this node")]
    ProofQueriesUnavailable,
}
