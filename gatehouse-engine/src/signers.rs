//! Mutable, weighted signer registry.
//!
//! The registry is self-governing: its mutation methods are reachable only
//! through governance operations routed through the execution engine, which
//! must themselves pass quorum first. Every mutation checks the invariant
//! `quorum <= total weight` against the resulting state before committing,
//! so a rejected mutation leaves the registry untouched.

use std::collections::BTreeMap;

use gatehouse_core::Address;

use crate::error::{EngineError, EngineResult};

/// Weighted signer set plus the quorum threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerRegistry {
    weights: BTreeMap<Address, u64>,
    quorum: u64,
}

impl SignerRegistry {
    /// Create the registry with its initial signer set.
    ///
    /// Rejects an initial configuration whose quorum is unreachable.
    pub fn new(initial: Vec<(Address, u64)>, quorum: u64) -> EngineResult<Self> {
        let weights: BTreeMap<Address, u64> = initial.into_iter().collect();
        let total = Self::sum(&weights);
        if quorum > total {
            return Err(EngineError::GovernanceInvariantViolated {
                total_weight: total,
                quorum,
            });
        }
        Ok(Self { weights, quorum })
    }

    fn sum(weights: &BTreeMap<Address, u64>) -> u64 {
        weights.values().fold(0u64, |acc, w| acc.saturating_add(*w))
    }

    /// The quorum threshold (sum of weights required).
    pub fn quorum(&self) -> u64 {
        self.quorum
    }

    /// Sum of all signer weights.
    pub fn total_weight(&self) -> u64 {
        Self::sum(&self.weights)
    }

    /// Weight of a signer, or None for a non-member.
    pub fn weight_of(&self, signer: &Address) -> Option<u64> {
        self.weights.get(signer).copied()
    }

    /// Is the address a current member?
    pub fn is_member(&self, signer: &Address) -> bool {
        self.weights.contains_key(signer)
    }

    /// Number of registered signers.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True if no signers are registered.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over (signer, weight) pairs in address order.
    pub fn signers(&self) -> impl Iterator<Item = (&Address, u64)> {
        self.weights.iter().map(|(a, w)| (a, *w))
    }

    /// Add a signer or update an existing signer's weight.
    ///
    /// Rejected if the resulting total weight would drop below the quorum.
    pub fn set_signer(&mut self, signer: Address, weight: u64) -> EngineResult<()> {
        let mut next = self.weights.clone();
        next.insert(signer, weight);
        self.commit(next, self.quorum)
    }

    /// Remove a signer. Removing a non-member is a no-op.
    ///
    /// Rejected if the resulting total weight would drop below the quorum.
    pub fn remove_signer(&mut self, signer: &Address) -> EngineResult<()> {
        let mut next = self.weights.clone();
        next.remove(signer);
        self.commit(next, self.quorum)
    }

    /// Change the quorum threshold.
    ///
    /// Rejected if the new threshold exceeds the current total weight.
    pub fn set_quorum(&mut self, threshold: u64) -> EngineResult<()> {
        self.commit(self.weights.clone(), threshold)
    }

    fn commit(&mut self, weights: BTreeMap<Address, u64>, quorum: u64) -> EngineResult<()> {
        let total = Self::sum(&weights);
        if quorum > total {
            return Err(EngineError::GovernanceInvariantViolated {
                total_weight: total,
                quorum,
            });
        }
        self.weights = weights;
        self.quorum = quorum;
        Ok(())
    }
}
