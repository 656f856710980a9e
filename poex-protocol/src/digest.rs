//! File content digest computation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};

use crate::types::Digest;

type Blake2b256 = Blake2b<U32>;

/// Compute the claim digest for a file's content.
///
/// The content is first hex-encoded (lowercase, two characters per
/// byte) and the Blake2b-256 hash is taken over the ASCII bytes of
/// that hex string, not the raw content. This matches the chain
/// frontend this client replaces, which fed the hex rendering of the
/// file buffer to its hasher.
///
/// Deterministic: identical content yields an identical digest,
/// regardless of the originating file name.
pub fn file_digest(content: &[u8]) -> Digest {
    let hex = data_encoding::HEXLOWER.encode(content);
    let mut hasher = Blake2b256::new();
    hasher.update(hex.as_bytes());
    Digest(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = file_digest(b"hello world");
        let b = file_digest(b"hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn different_content_different_digest() {
        assert_ne!(file_digest(b"hello"), file_digest(b"hello!"));
    }

    #[test]
    fn empty_content_has_a_digest() {
        let digest = file_digest(b"");
        // Blake2b-256 of the empty string, since the hex encoding of
        // no bytes is empty.
        assert_eq!(digest.to_hex().len(), 66);
    }

    #[test]
    fn hashes_hex_encoding_not_raw_bytes() {
        // The digest of the byte 0xab must equal the digest obtained by
        // hashing the ASCII string "ab" directly.
        let via_bytes = file_digest(&[0xab]);

        let mut hasher = Blake2b256::new();
        hasher.update(b"ab");
        let direct = Digest(hasher.finalize().into());

        assert_eq!(via_bytes, direct);
    }
}
