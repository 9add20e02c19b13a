//! Deterministic binary serialization.
//!
//! Approval digests commit to serialized operation bytes, so every structure
//! that feeds a digest must encode identically on every platform. All
//! encoding goes through bincode with a pinned configuration:
//! - Fixed-size integer encoding (not variable-length)
//! - Little-endian byte order
//! - Reject trailing bytes on deserialization

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::SerializationError;

fn config() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Serialize a value to bytes using the deterministic configuration.
pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    config()
        .serialize(value)
        .map_err(|e| SerializationError::EncodeFailed(e.to_string()))
}

/// Deserialize a value from bytes.
///
/// Fails on malformed input, trailing bytes, or a type mismatch.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    config()
        .deserialize(bytes)
        .map_err(|e| SerializationError::DecodeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Sample {
        amount: u128,
        target: [u8; 20],
        args: Vec<u8>,
    }

    #[test]
    fn test_roundtrip() {
        let original = Sample {
            amount: 1_000_000,
            target: [7u8; 20],
            args: vec![1, 2, 3],
        };

        let bytes = serialize(&original).unwrap();
        let recovered: Sample = deserialize(&bytes).unwrap();

        assert_eq!(original, recovered);
    }

    #[test]
    fn test_determinism() {
        let value = Sample {
            amount: u128::MAX,
            target: [2u8; 20],
            args: vec![],
        };

        assert_eq!(serialize(&value).unwrap(), serialize(&value).unwrap());
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = serialize(&42u64).unwrap();
        bytes.push(0xFF);

        let result: Result<u64, _> = deserialize(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_fixed_int_little_endian() {
        // Fixed-width encoding: u64 is always 8 bytes, least significant first.
        let bytes = serialize(&0x0102030405060708u64).unwrap();
        assert_eq!(bytes, vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_invalid_bytes() {
        let garbage = vec![0xFF, 0xFF, 0xFF];
        let result: Result<Sample, _> = deserialize(&garbage);
        assert!(result.is_err());
    }
}
