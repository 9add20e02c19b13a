//! Weighted multi-party approvals.
//!
//! An [`Approval`] carries the signature set a governance proposer collected
//! off-engine, plus the nonce and expiry that protect it against replay.
//! Every signer signs the canonical digest produced by [`approval_digest`],
//! which binds the payload to one nonce, one expiry, one chain, and one
//! engine instance.

use serde::{Deserialize, Serialize};

use crate::crypto::{sha256_concat, sign, Address, KeyPair, PublicKey, Signature};

/// Domain separation tag for approval digests.
const APPROVAL_DOMAIN: &[u8] = b"gatehouse/approval/v1";

/// One signer's contribution to an approval.
///
/// The claimed identity is the address derived from `public_key`; the
/// signature must verify against that same key, so a signature can never
/// count toward another signer's weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntry {
    /// The public key of the claimed signer.
    pub public_key: PublicKey,
    /// Ed25519 signature over the canonical approval digest.
    pub signature: Signature,
}

impl SignerEntry {
    /// Sign a canonical approval digest with `key_pair`.
    pub fn sign(key_pair: &KeyPair, digest: &[u8; 32]) -> Self {
        Self {
            public_key: key_pair.public_key(),
            signature: sign(key_pair.signing_key(), digest),
        }
    }
}

/// A signature set over one operation or batch.
///
/// Entries may arrive in any order; weight summation is order-independent.
/// The nonce and expiry are covered by every signature, so neither can be
/// altered after signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// The collected signer entries.
    pub entries: Vec<SignerEntry>,

    /// Sequential approval nonce expected by the engine.
    pub nonce: u64,

    /// Unix-seconds expiry; must be strictly in the future and strictly
    /// above the engine's accepted-expiry watermark.
    pub expiry: u64,
}

impl Approval {
    /// Create an approval from collected entries.
    pub fn new(entries: Vec<SignerEntry>, nonce: u64, expiry: u64) -> Self {
        Self {
            entries,
            nonce,
            expiry,
        }
    }
}

/// Compute the canonical 32-byte approval digest.
///
/// SHA-256 over the domain tag, the payload digest (operation or batch
/// content hash), nonce, expiry, chain identifier, and engine address, in
/// that order with fixed-width little-endian integers. Chain and engine
/// binding prevents cross-chain and cross-instance replay of an otherwise
/// valid signature set.
pub fn approval_digest(
    payload_digest: &[u8; 32],
    nonce: u64,
    expiry: u64,
    chain_id: u64,
    engine: &Address,
) -> [u8; 32] {
    sha256_concat(&[
        APPROVAL_DOMAIN,
        payload_digest,
        &nonce.to_le_bytes(),
        &expiry.to_le_bytes(),
        &chain_id.to_le_bytes(),
        engine.as_bytes(),
    ])
}
