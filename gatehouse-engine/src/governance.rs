//! Governance actions over the signer registry.
//!
//! Signer-set changes are ordinary operations targeting the engine's own
//! address under reserved selectors. They ride the same execution pipeline
//! as any other operation and take effect only after passing quorum; the
//! registry invariant is checked transactionally at commit time, never
//! eagerly at proposal time.

use serde::{Deserialize, Serialize};

use gatehouse_core::serialization::{deserialize, serialize};
use gatehouse_core::{Address, Operation, Selector};

use crate::error::{EngineError, EngineResult};

/// Reserved selector for [`GovernanceAction::SetSigner`].
pub const SET_SIGNER: Selector = Selector(*b"gv01");
/// Reserved selector for [`GovernanceAction::RemoveSigner`].
pub const REMOVE_SIGNER: Selector = Selector(*b"gv02");
/// Reserved selector for [`GovernanceAction::SetQuorum`].
pub const SET_QUORUM: Selector = Selector(*b"gv03");

/// A mutation of the signer registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceAction {
    /// Add a signer or update an existing signer's weight.
    SetSigner {
        /// The signer to add or update.
        signer: Address,
        /// The new weight.
        weight: u64,
    },
    /// Remove a signer from the registry.
    RemoveSigner {
        /// The signer to remove.
        signer: Address,
    },
    /// Change the quorum threshold.
    SetQuorum {
        /// The new threshold (sum of weights required).
        threshold: u64,
    },
}

impl GovernanceAction {
    fn selector(&self) -> Selector {
        match self {
            GovernanceAction::SetSigner { .. } => SET_SIGNER,
            GovernanceAction::RemoveSigner { .. } => REMOVE_SIGNER,
            GovernanceAction::SetQuorum { .. } => SET_QUORUM,
        }
    }

    /// Encode this action as an operation targeting `engine`.
    pub fn to_operation(&self, engine: Address) -> Operation {
        let args = serialize(self).expect("governance action serialization should not fail");
        Operation::call(engine, self.selector(), args)
    }

    /// Decode a governance action from an engine-targeted operation.
    ///
    /// Fails if the selector is not one of the reserved governance
    /// selectors, if the args do not decode, or if the decoded variant does
    /// not match the selector.
    pub fn decode(op: &Operation) -> EngineResult<Self> {
        let selector = op.payload.selector;
        if selector != SET_SIGNER && selector != REMOVE_SIGNER && selector != SET_QUORUM {
            return Err(EngineError::MalformedGovernanceArgs);
        }
        let action: GovernanceAction = deserialize(&op.payload.args)
            .map_err(|_| EngineError::MalformedGovernanceArgs)?;
        if action.selector() != selector {
            return Err(EngineError::MalformedGovernanceArgs);
        }
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Address {
        Address([0xEE; 20])
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let actions = [
            GovernanceAction::SetSigner {
                signer: Address([1; 20]),
                weight: 5,
            },
            GovernanceAction::RemoveSigner {
                signer: Address([2; 20]),
            },
            GovernanceAction::SetQuorum { threshold: 4 },
        ];

        for action in actions {
            let op = action.to_operation(engine());
            assert_eq!(op.target, engine());
            assert_eq!(GovernanceAction::decode(&op).unwrap(), action);
        }
    }

    #[test]
    fn test_decode_rejects_unreserved_selector() {
        let op = Operation::call(engine(), Selector(*b"swap"), vec![]);
        assert!(matches!(
            GovernanceAction::decode(&op),
            Err(EngineError::MalformedGovernanceArgs)
        ));
    }

    #[test]
    fn test_decode_rejects_garbage_args() {
        let op = Operation::call(engine(), SET_QUORUM, vec![0xFF]);
        assert!(matches!(
            GovernanceAction::decode(&op),
            Err(EngineError::MalformedGovernanceArgs)
        ));
    }

    #[test]
    fn test_decode_rejects_selector_variant_mismatch() {
        let action = GovernanceAction::SetQuorum { threshold: 2 };
        let mut op = action.to_operation(engine());
        op.payload.selector = SET_SIGNER;

        assert!(matches!(
            GovernanceAction::decode(&op),
            Err(EngineError::MalformedGovernanceArgs)
        ));
    }
}
