//! Error types for authorization and execution.
//!
//! Every rejection carries a distinct, stable kind so off-engine tooling can
//! tell "fix your signatures" apart from "this target is not permitted" and
//! from "someone else is mid-execution". All errors are terminal for the
//! enclosing operation or batch; nothing is retried internally.

use gatehouse_core::{Address, Selector};

/// Why a signature set failed quorum verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuorumFailure {
    /// The approval expiry is not strictly in the future.
    Expired {
        /// Expiry carried by the approval.
        expiry: u64,
        /// Verification-time clock.
        now: u64,
    },
    /// The approval expiry does not exceed the accepted-expiry watermark.
    StaleExpiry {
        /// Expiry carried by the approval.
        expiry: u64,
        /// Highest expiry accepted so far.
        watermark: u64,
    },
    /// The approval nonce does not match the engine's expected nonce.
    BadNonce {
        /// Nonce the engine expected.
        expected: u64,
        /// Nonce carried by the approval.
        got: u64,
    },
    /// A signature did not verify against its claimed signer.
    BadSignature {
        /// Address derived from the supplied public key.
        signer: Address,
    },
    /// A signer is not a current member of the signer registry.
    UnknownSigner {
        /// The non-member address.
        signer: Address,
    },
    /// The same signer appeared more than once in the approval.
    DuplicateSigner {
        /// The repeated address.
        signer: Address,
    },
    /// Summed signer weight is below the quorum threshold.
    InsufficientWeight {
        /// Total weight of the valid signers.
        weight: u64,
        /// Required quorum threshold.
        quorum: u64,
    },
}

impl std::fmt::Display for QuorumFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuorumFailure::Expired { expiry, now } => {
                write!(f, "approval expired: expiry {} not after now {}", expiry, now)
            }
            QuorumFailure::StaleExpiry { expiry, watermark } => {
                write!(
                    f,
                    "stale approval: expiry {} not above watermark {}",
                    expiry, watermark
                )
            }
            QuorumFailure::BadNonce { expected, got } => {
                write!(f, "bad nonce: expected {}, got {}", expected, got)
            }
            QuorumFailure::BadSignature { signer } => {
                write!(f, "bad signature from {}", signer)
            }
            QuorumFailure::UnknownSigner { signer } => {
                write!(f, "unknown signer {}", signer)
            }
            QuorumFailure::DuplicateSigner { signer } => {
                write!(f, "duplicate signer {}", signer)
            }
            QuorumFailure::InsufficientWeight { weight, quorum } => {
                write!(f, "weight {} below quorum {}", weight, quorum)
            }
        }
    }
}

/// All authorization and execution errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The (target, selector) pair is absent from the whitelist.
    NotWhitelisted {
        /// Destination of the rejected call.
        target: Address,
        /// Entry point of the rejected call.
        selector: Selector,
    },
    /// The parameter-validator predicate rejected the operation.
    ParameterRejected {
        /// Destination of the rejected call.
        target: Address,
        /// Entry point of the rejected call.
        selector: Selector,
    },
    /// Signature weight below threshold, or an invalid/duplicate/expired/
    /// replayed signature set.
    QuorumNotMet {
        /// The specific verification failure.
        reason: QuorumFailure,
    },
    /// Quorum authorization is required but no approval was supplied.
    ApprovalRequired,
    /// A reentrant call arrived from an identity other than the hook.
    NestedCallNotPermitted {
        /// The rejected caller.
        caller: Address,
    },
    /// The pre- or post-call hook failed.
    HookRejected {
        /// Reason reported by the hook.
        reason: String,
    },
    /// The underlying raw call failed; reason propagated verbatim.
    CallFailed {
        /// Failure reason from the ledger.
        reason: String,
    },
    /// A signer-registry mutation would make quorum unreachable.
    GovernanceInvariantViolated {
        /// Total signer weight after the rejected mutation.
        total_weight: u64,
        /// Quorum threshold after the rejected mutation.
        quorum: u64,
    },
    /// A batch must contain at least one operation.
    EmptyBatch,
    /// An operation targeting the engine carried undecodable governance args.
    MalformedGovernanceArgs,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotWhitelisted { target, selector } => {
                write!(f, "call not approved: {} on {}", selector, target)
            }
            EngineError::ParameterRejected { target, selector } => {
                write!(f, "parameters rejected for {} on {}", selector, target)
            }
            EngineError::QuorumNotMet { reason } => {
                write!(f, "quorum not met: {}", reason)
            }
            EngineError::ApprovalRequired => {
                write!(f, "approval required but not supplied")
            }
            EngineError::NestedCallNotPermitted { caller } => {
                write!(f, "nested call not permitted from {}", caller)
            }
            EngineError::HookRejected { reason } => {
                write!(f, "hook rejected: {}", reason)
            }
            EngineError::CallFailed { reason } => {
                write!(f, "call failed: {}", reason)
            }
            EngineError::GovernanceInvariantViolated { total_weight, quorum } => {
                write!(
                    f,
                    "quorum unreachable: total weight {} below quorum {}",
                    total_weight, quorum
                )
            }
            EngineError::EmptyBatch => write!(f, "batch contains no operations"),
            EngineError::MalformedGovernanceArgs => {
                write!(f, "malformed governance arguments")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::NotWhitelisted {
            target: Address([0u8; 20]),
            selector: Selector([1, 2, 3, 4]),
        };
        assert!(err.to_string().contains("not approved"));

        let err = EngineError::QuorumNotMet {
            reason: QuorumFailure::InsufficientWeight { weight: 2, quorum: 3 },
        };
        assert!(err.to_string().contains("weight 2 below quorum 3"));
    }

    #[test]
    fn test_quorum_failure_variants_distinct() {
        let a = EngineError::QuorumNotMet {
            reason: QuorumFailure::BadNonce { expected: 0, got: 1 },
        };
        let b = EngineError::QuorumNotMet {
            reason: QuorumFailure::StaleExpiry { expiry: 5, watermark: 9 },
        };
        assert_ne!(a, b);
    }
}
