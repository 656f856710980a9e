//! Transaction call descriptions submitted to the chain.

use serde::{Deserialize, Serialize};

use crate::types::Digest;

/// Pallet hosting the proof-of-existence calls.
pub const POE_PALLET: &str = "poe";

/// A signed-transaction request: target pallet, call name, string
/// arguments, and a flag per argument marking it as a plain (signed-tx)
/// parameter for the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxCall {
    pub pallet: String,
    pub call: String,
    pub params: Vec<String>,
    pub param_signed: Vec<bool>,
}

impl TxCall {
    /// Claim the given digest for the signing account.
    pub fn create_claim(digest: &Digest) -> Self {
        Self {
            pallet: POE_PALLET.to_string(),
            call: "create_claim".to_string(),
            params: vec![digest.to_hex()],
            param_signed: vec![true],
        }
    }

    /// Revoke the signing account's claim on the given digest.
    pub fn revoke_claim(digest: &Digest) -> Self {
        Self {
            pallet: POE_PALLET.to_string(),
            call: "revoke_claim".to_string(),
            params: vec![digest.to_hex()],
            param_signed: vec![true],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_claim_targets_poe_pallet() {
        let digest = Digest([7; 32]);
        let call = TxCall::create_claim(&digest);
        assert_eq!(call.pallet, "poe");
        assert_eq!(call.call, "create_claim");
        assert_eq!(call.params, vec![digest.to_hex()]);
        assert_eq!(call.param_signed, vec![true]);
    }

    #[test]
    fn revoke_claim_carries_same_digest_argument() {
        let digest = Digest([9; 32]);
        let call = TxCall::revoke_claim(&digest);
        assert_eq!(call.call, "revoke_claim");
        assert_eq!(call.params, vec![digest.to_hex()]);
    }
}
