//! # Gatehouse Engine
//!
//! Operation authorization and execution engine gating outbound calls made
//! on behalf of a custodial pool of funds. Given a proposed operation or
//! atomic batch, the engine decides whether it is permitted and, if so,
//! executes it exactly once with auditable side effects.
//!
//! Three gates compose:
//! - [`WhitelistRegistry`]: an immutable allow-list of (target, selector)
//!   pairs fixed at construction
//! - [`SignatureQuorumValidator`]: weighted multi-party signature sets with
//!   nonce, expiry-watermark, and chain binding against replay
//! - [`ExecutionEngine`]: the reentrancy-guarded pipeline that runs the
//!   authorized calls through the [`Ledger`] boundary and the optional
//!   [`HookModule`] protocol
//!
//! Governance (changes to the signer set) routes through the same engine
//! path as any other operation and must itself pass quorum.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod governance;
pub mod hooks;
pub mod ledger;
pub mod quorum;
pub mod signers;
pub mod whitelist;

// Re-export commonly used types at crate root
pub use engine::{AuthorizationMode, EngineConfig, ExecutionEngine};
pub use error::{EngineError, EngineResult, QuorumFailure};
pub use governance::GovernanceAction;
pub use hooks::{HookContext, HookError, HookModule};
pub use ledger::{CallError, Ledger, MemoryLedger};
pub use quorum::SignatureQuorumValidator;
pub use signers::SignerRegistry;
pub use whitelist::{AllowAll, ParameterValidator, WhitelistEntry, WhitelistRegistry};
