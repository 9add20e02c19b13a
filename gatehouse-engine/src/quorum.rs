//! Weighted signature-quorum verification.
//!
//! Verifies that a candidate signature set over the canonical approval
//! digest meets the weight threshold, rejecting duplicate signers, expired
//! or stale approvals, and nonce or chain mismatches. On success the
//! accepted-expiry watermark and nonce counter advance before control
//! returns, so a reentrant call during execution can never reuse the same
//! approval.

use std::collections::BTreeSet;

use gatehouse_core::{approval_digest, derive_address, verify, Address, Approval};

use crate::error::{EngineError, EngineResult, QuorumFailure};
use crate::signers::SignerRegistry;

/// Stateful quorum validator bound to one engine instance on one chain.
#[derive(Clone, Debug)]
pub struct SignatureQuorumValidator {
    chain_id: u64,
    engine: Address,
    watermark: u64,
    next_nonce: u64,
}

impl SignatureQuorumValidator {
    /// Create a validator for the given chain and engine identity.
    pub fn new(chain_id: u64, engine: Address) -> Self {
        Self {
            chain_id,
            engine,
            watermark: 0,
            next_nonce: 0,
        }
    }

    /// The highest expiry accepted so far.
    pub fn watermark(&self) -> u64 {
        self.watermark
    }

    /// The nonce the next approval must carry.
    pub fn next_nonce(&self) -> u64 {
        self.next_nonce
    }

    /// Compute the canonical digest signers must sign for `payload_digest`
    /// at the validator's current nonce.
    ///
    /// Proposer-side helper: collect signatures over exactly this digest.
    pub fn digest_for(&self, payload_digest: &[u8; 32], expiry: u64) -> [u8; 32] {
        approval_digest(
            payload_digest,
            self.next_nonce,
            expiry,
            self.chain_id,
            &self.engine,
        )
    }

    /// Verify an approval over `payload_digest` against the signer registry.
    ///
    /// Side-effecting: on success, the watermark advances to the approval's
    /// expiry and the nonce counter increments. All rejections are
    /// [`EngineError::QuorumNotMet`] with a stable [`QuorumFailure`] reason.
    pub fn verify(
        &mut self,
        payload_digest: &[u8; 32],
        approval: &Approval,
        registry: &SignerRegistry,
        now: u64,
    ) -> EngineResult<()> {
        if approval.expiry <= now {
            return Self::fail(QuorumFailure::Expired {
                expiry: approval.expiry,
                now,
            });
        }
        if approval.expiry <= self.watermark {
            return Self::fail(QuorumFailure::StaleExpiry {
                expiry: approval.expiry,
                watermark: self.watermark,
            });
        }
        if approval.nonce != self.next_nonce {
            return Self::fail(QuorumFailure::BadNonce {
                expected: self.next_nonce,
                got: approval.nonce,
            });
        }

        let digest = approval_digest(
            payload_digest,
            approval.nonce,
            approval.expiry,
            self.chain_id,
            &self.engine,
        );

        let mut seen: BTreeSet<Address> = BTreeSet::new();
        let mut weight = 0u64;

        for entry in &approval.entries {
            let signer = derive_address(&entry.public_key);

            if verify(&entry.public_key, &digest, &entry.signature).is_err() {
                return Self::fail(QuorumFailure::BadSignature { signer });
            }

            let w = match registry.weight_of(&signer) {
                Some(w) => w,
                None => return Self::fail(QuorumFailure::UnknownSigner { signer }),
            };

            // A signer who signs twice is rejected outright, not merely
            // counted once.
            if !seen.insert(signer) {
                return Self::fail(QuorumFailure::DuplicateSigner { signer });
            }

            weight = weight.saturating_add(w);
        }

        if weight < registry.quorum() {
            return Self::fail(QuorumFailure::InsufficientWeight {
                weight,
                quorum: registry.quorum(),
            });
        }

        // Persist replay state before returning so a reentrant call during
        // execution cannot reuse this approval.
        self.watermark = approval.expiry;
        self.next_nonce += 1;

        tracing::debug!(
            nonce = approval.nonce,
            expiry = approval.expiry,
            weight,
            quorum = registry.quorum(),
            "approval accepted"
        );

        Ok(())
    }

    fn fail(reason: QuorumFailure) -> EngineResult<()> {
        tracing::warn!(%reason, "approval rejected");
        Err(EngineError::QuorumNotMet { reason })
    }
}
