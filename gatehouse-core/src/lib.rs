//! # Gatehouse Core
//!
//! Core types, cryptography, and serialization for the Gatehouse
//! operation-authorization engine.
//!
//! This crate provides the foundation the engine crate builds on:
//! - Cryptographic primitives (Ed25519 signatures, SHA-256 hashing)
//! - Signer and target addresses (20-byte, derived from public keys)
//! - Operation and batch descriptors for outbound calls
//! - Weighted multi-party approvals and their canonical digest
//! - Deterministic binary serialization

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod crypto;
pub mod error;
pub mod serialization;
pub mod types;

// Re-export commonly used types at crate root
pub use crypto::{derive_address, sha256, sign, verify, Address, KeyPair, PublicKey, SecretKey, Signature};
pub use error::{CoreError, CryptoError, SerializationError};
pub use types::{
    approval_digest, Approval, BatchOperation, CallPayload, ExecutionRecord, Operation, Selector,
    SignerEntry,
};
