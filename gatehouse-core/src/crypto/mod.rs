//! Cryptographic primitives for approval signing.
//!
//! - Ed25519 key pairs and signatures ([`KeyPair`], [`Signature`])
//! - SHA-256 hashing ([`sha256`], [`sha256_concat`])
//! - 20-byte addresses derived from public keys ([`Address`])

mod address;
mod hashing;
mod keys;
mod signing;

pub use address::{derive_address, Address};
pub use hashing::{sha256, sha256_concat};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use signing::{sign, verify, Signature};
