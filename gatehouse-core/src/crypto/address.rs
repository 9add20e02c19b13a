//! 20-byte addresses for signers, call targets, and engine instances.
//!
//! A signer address is the first 20 bytes of the SHA-256 hash of the
//! Ed25519 public key. Call targets and engine instances use the same
//! address space so one identifier type flows through the whole engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hashing::sha256;
use super::keys::PublicKey;

/// A 20-byte identity: a signer, a call target, or the engine itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Get the raw bytes of the address.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

/// Derive a signer address from a public key.
///
/// The address is the first 20 bytes of SHA-256(public_key_bytes).
pub fn derive_address(public_key: &PublicKey) -> Address {
    let hash = sha256(public_key.as_bytes());
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[..20]);
    Address(address)
}
