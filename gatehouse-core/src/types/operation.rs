//! Outbound call descriptors.
//!
//! An [`Operation`] describes one external call the engine may perform on
//! behalf of the pool: where it goes, how much native value it carries, and
//! which entry point it invokes with which arguments. Operations are
//! immutable once constructed; their digest identifies them for auditing
//! only. Replay protection lives in the approval nonce and expiry, never in
//! operation content.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::{sha256, Address};
use crate::serialization::serialize;

/// Four-byte entry-point identifier of a call payload.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// Get the raw bytes of the selector.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector(0x{})", hex::encode(self.0))
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Selector(bytes)
    }
}

/// Entry-point identifier plus encoded arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPayload {
    /// Which entry point the target should dispatch to.
    pub selector: Selector,
    /// Encoded call arguments, opaque to the engine.
    pub args: Vec<u8>,
}

/// A single authorized external call descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Destination of the call.
    pub target: Address,

    /// Native value carried by the call.
    pub value: u128,

    /// Entry point and arguments.
    pub payload: CallPayload,

    /// Optional validation payload consumed by parameter validators.
    pub validation: Option<Vec<u8>>,
}

impl Operation {
    /// Create an operation invoking `selector` on `target` with no value.
    pub fn call(target: Address, selector: Selector, args: Vec<u8>) -> Self {
        Self {
            target,
            value: 0,
            payload: CallPayload { selector, args },
            validation: None,
        }
    }

    /// Create a plain value transfer to `target`.
    ///
    /// Transfers use the all-zero selector and carry no arguments.
    pub fn transfer(target: Address, value: u128) -> Self {
        Self {
            target,
            value,
            payload: CallPayload {
                selector: Selector([0u8; 4]),
                args: Vec::new(),
            },
            validation: None,
        }
    }

    /// Attach native value to the operation.
    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }

    /// Attach a validation payload to the operation.
    pub fn with_validation(mut self, validation: Vec<u8>) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Content digest of this operation, for auditing.
    ///
    /// The digest is SHA-256 of the deterministically serialized operation.
    /// It is never used for deduplication.
    pub fn digest(&self) -> [u8; 32] {
        let bytes = serialize(self).expect("operation serialization should not fail");
        sha256(&bytes)
    }
}

/// An atomically-executed ordered list of operations.
///
/// All-or-nothing: any sub-operation failure aborts the effects of the
/// entire batch. One shared validation payload covers the whole batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperation {
    /// The operations, executed in order.
    pub operations: Vec<Operation>,

    /// Optional validation payload shared by the whole batch.
    pub validation: Option<Vec<u8>>,
}

impl BatchOperation {
    /// Create a batch from an ordered list of operations.
    pub fn new(operations: Vec<Operation>) -> Self {
        Self {
            operations,
            validation: None,
        }
    }

    /// Content digest of this batch, for auditing and approval binding.
    pub fn digest(&self) -> [u8; 32] {
        let bytes = serialize(self).expect("batch serialization should not fail");
        sha256(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_op() -> Operation {
        Operation::call(Address([1u8; 20]), Selector(*b"swap"), vec![9, 9, 9]).with_value(500)
    }

    #[test]
    fn test_operation_digest_determinism() {
        let op = sample_op();
        assert_eq!(op.digest(), op.digest());
    }

    #[test]
    fn test_operation_digest_covers_contents() {
        let op = sample_op();

        let mut other = op.clone();
        other.value += 1;
        assert_ne!(op.digest(), other.digest());

        let mut other = op.clone();
        other.payload.args.push(0);
        assert_ne!(op.digest(), other.digest());

        let other = op.clone().with_validation(vec![1]);
        assert_ne!(op.digest(), other.digest());
    }

    #[test]
    fn test_transfer_has_zero_selector() {
        let op = Operation::transfer(Address([2u8; 20]), 1_000);
        assert_eq!(op.payload.selector, Selector([0u8; 4]));
        assert!(op.payload.args.is_empty());
        assert_eq!(op.value, 1_000);
    }

    #[test]
    fn test_batch_digest_differs_from_member_digest() {
        let op = sample_op();
        let batch = BatchOperation::new(vec![op.clone()]);
        assert_ne!(batch.digest(), op.digest());
    }

    #[test]
    fn test_batch_digest_order_sensitive() {
        let a = sample_op();
        let b = Operation::transfer(Address([3u8; 20]), 7);

        let batch_ab = BatchOperation::new(vec![a.clone(), b.clone()]);
        let batch_ba = BatchOperation::new(vec![b, a]);

        assert_ne!(batch_ab.digest(), batch_ba.digest());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let batch = BatchOperation::new(vec![sample_op()]);
        let bytes = serialize(&batch).unwrap();
        let recovered: BatchOperation = crate::serialization::deserialize(&bytes).unwrap();
        assert_eq!(batch, recovered);
    }
}
