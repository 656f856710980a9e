//! Core types shared across all poex crates.

use serde::{Deserialize, Serialize};

/// Fixed-length fingerprint of file content, used as the claim lookup key.
/// Wraps a 32-byte Blake2b-256 output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Encode the digest as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", data_encoding::HEXLOWER.encode(&self.0))
    }

    /// Decode a digest from a lowercase hex string, with or without
    /// the `0x` prefix.
    ///
    /// Returns `None` if the string is not valid hex or not exactly 32 bytes.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = data_encoding::HEXLOWER.decode(hex.as_bytes()).ok()?;
        if bytes.len() != 32 {
            return None;
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Some(Self(arr))
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A chain account address.
///
/// Treated as opaque: the only operation the client performs on it is
/// exact string equality against a claim's owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
