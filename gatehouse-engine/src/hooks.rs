//! Pluggable pre/post-call hook protocol.
//!
//! A hook observes every executed sub-operation and may react with its own
//! accounting side effects. While an execution context is open, only the
//! hook may route nested calls back through the engine; the engine verifies
//! this privilege by comparing the caller identity against the stored hook
//! identity, never by any weaker signal.

use std::fmt;

use gatehouse_core::{Address, Operation};

use crate::engine::ExecutionEngine;
use crate::ledger::Ledger;

/// Opaque context blob returned by `pre_check` and handed to `post_check`.
///
/// The engine never inspects the contents; the hook uses it to carry state
/// (a recorded balance, a decoded argument) across the raw call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HookContext(pub Vec<u8>);

/// Failure reported by a hook; aborts the enclosing operation or batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookError(pub String);

impl HookError {
    /// Create a hook error from a reason string.
    pub fn new(reason: impl Into<String>) -> Self {
        HookError(reason.into())
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HookError {}

/// Pre/post-call observer with a narrow reentrant-call privilege.
///
/// Both checks receive the engine and ledger so the hook can issue nested
/// calls through [`ExecutionEngine::execute`] while the execution context is
/// open; such calls must carry the hook's own identity as caller. Hooks are
/// invoked once per sub-operation and must tolerate that.
pub trait HookModule {
    /// The identity this hook calls back with. Nested calls from any other
    /// identity are rejected while a context is open.
    fn identity(&self) -> Address;

    /// Observe an operation before its raw call. Returning an error aborts
    /// the enclosing operation or batch.
    fn pre_check(
        &self,
        engine: &mut ExecutionEngine,
        ledger: &mut dyn Ledger,
        op: &Operation,
        original_caller: &Address,
    ) -> Result<HookContext, HookError>;

    /// Observe an operation after its raw call, with the context blob from
    /// `pre_check`. Returning an error aborts the enclosing operation or
    /// batch.
    fn post_check(
        &self,
        engine: &mut ExecutionEngine,
        ledger: &mut dyn Ledger,
        ctx: HookContext,
    ) -> Result<(), HookError>;
}
