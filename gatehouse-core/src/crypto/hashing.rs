//! SHA-256 hashing utilities.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 hash of concatenated data slices.
///
/// More efficient than allocating a buffer for concatenation; used to bind
/// the parts of an approval digest together.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_determinism() {
        let data = b"gatehouse";
        assert_eq!(sha256(data), sha256(data));
    }

    #[test]
    fn test_sha256_distinct_inputs() {
        assert_ne!(sha256(b"one"), sha256(b"two"));
    }

    #[test]
    fn test_sha256_concat_equals_manual() {
        let concat_hash = sha256_concat(&[b"hello", b" world"]);
        let manual_hash = sha256(b"hello world");
        assert_eq!(concat_hash, manual_hash);
    }

    #[test]
    fn test_sha256_concat_split_points_irrelevant() {
        // Different split points over the same bytes hash identically.
        let a = sha256_concat(&[b"ab", b"cd"]);
        let b = sha256_concat(&[b"a", b"bcd"]);
        assert_eq!(a, b);
    }
}
