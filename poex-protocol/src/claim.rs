//! Claim records and the claim status derivation used by the UI.

use serde::{Deserialize, Serialize};

use crate::types::AccountId;

/// A claim on a digest: the owning account and the block number at
/// which it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub owner: AccountId,
    pub block: u64,
}

/// Live status of the claim entry for the current digest.
///
/// `Unclaimed` is the reset value: it applies before any file is
/// chosen, whenever the digest changes, and whenever the remote entry
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClaimStatus {
    #[default]
    Unclaimed,
    Claimed(Claim),
}

impl ClaimStatus {
    /// Map a remote entry emission onto a status: an absent entry is
    /// unclaimed, a present one claimed.
    pub fn from_entry(entry: Option<Claim>) -> Self {
        match entry {
            None => Self::Unclaimed,
            Some(claim) => Self::Claimed(claim),
        }
    }

    /// True iff a claim with an owner exists for the current digest.
    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Claimed(_))
    }

    /// True iff the claim exists and is owned by `account`.
    ///
    /// Ownership is exact string equality on the address.
    pub fn can_revoke(&self, account: &AccountId) -> bool {
        match self {
            Self::Claimed(claim) => claim.owner == *account,
            Self::Unclaimed => false,
        }
    }

    pub fn owner(&self) -> Option<&AccountId> {
        match self {
            Self::Claimed(claim) => Some(&claim.owner),
            Self::Unclaimed => None,
        }
    }

    pub fn block(&self) -> Option<u64> {
        match self {
            Self::Claimed(claim) => Some(claim.block),
            Self::Unclaimed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claimed_by(address: &str, block: u64) -> ClaimStatus {
        ClaimStatus::Claimed(Claim {
            owner: AccountId::from(address),
            block,
        })
    }

    #[test]
    fn default_is_unclaimed() {
        let status = ClaimStatus::default();
        assert!(!status.is_claimed());
        assert_eq!(status.owner(), None);
        assert_eq!(status.block(), None);
    }

    #[test]
    fn from_entry_maps_absent_to_unclaimed() {
        assert_eq!(ClaimStatus::from_entry(None), ClaimStatus::Unclaimed);
    }

    #[test]
    fn from_entry_maps_present_to_claimed() {
        let claim = Claim {
            owner: AccountId::from("alice"),
            block: 42,
        };
        let status = ClaimStatus::from_entry(Some(claim.clone()));
        assert!(status.is_claimed());
        assert_eq!(status.owner(), Some(&claim.owner));
        assert_eq!(status.block(), Some(42));
    }

    #[test]
    fn owner_can_revoke() {
        let status = claimed_by("alice", 7);
        assert!(status.can_revoke(&AccountId::from("alice")));
    }

    #[test]
    fn other_account_cannot_revoke() {
        let status = claimed_by("alice", 7);
        assert!(!status.can_revoke(&AccountId::from("bob")));
    }

    #[test]
    fn unclaimed_cannot_be_revoked() {
        assert!(!ClaimStatus::Unclaimed.can_revoke(&AccountId::from("alice")));
    }
}
