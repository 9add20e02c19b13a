//! The ledger boundary the engine executes calls through.
//!
//! The engine never mutates pool funds directly; it hands each authorized
//! operation to a [`Ledger`] implementation supplied by the accounting side.
//! The ledger also supplies batch atomicity: the engine takes a checkpoint
//! at frame entry, rolls back to it on any failure, and releases it on
//! success, keeping no per-call undo bookkeeping of its own.

use std::collections::HashMap;
use std::fmt;

use gatehouse_core::{Address, Operation, Selector};

/// Failure reason from a raw call, propagated verbatim to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallError(pub String);

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CallError {}

/// Execution boundary between the engine and the surrounding ledger.
pub trait Ledger {
    /// Perform one raw call: move `op.value` to the target and invoke the
    /// entry point with the payload. Returns the call's output bytes.
    fn execute_call(&mut self, op: &Operation) -> Result<Vec<u8>, CallError>;

    /// Take a checkpoint of the current ledger state.
    fn checkpoint(&mut self) -> u64;

    /// Discard all effects applied after `checkpoint`.
    fn rollback_to(&mut self, checkpoint: u64);

    /// Release `checkpoint`, keeping the effects applied after it.
    ///
    /// Called once the frame that took the checkpoint completes; the ledger
    /// may drop any undo state held for it.
    fn commit(&mut self, checkpoint: u64);
}

#[derive(Clone)]
struct Snapshot {
    balances: HashMap<Address, u128>,
    calls_len: usize,
}

/// In-memory ledger: target balances plus a journal of performed calls.
///
/// Used by the accounting side in tests and simulations. Calls can be made
/// to fail on a per-(target, selector) basis to exercise abort paths.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    balances: HashMap<Address, u128>,
    calls: Vec<(Address, u128, Selector)>,
    failures: HashMap<(Address, Selector), String>,
    snapshots: Vec<Snapshot>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a balance outside the engine path (test setup).
    pub fn credit(&mut self, target: Address, amount: u128) {
        let balance = self.balances.entry(target).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Current balance of a target.
    pub fn balance_of(&self, target: &Address) -> u128 {
        self.balances.get(target).copied().unwrap_or(0)
    }

    /// The journal of performed calls, in execution order.
    pub fn calls(&self) -> &[(Address, u128, Selector)] {
        &self.calls
    }

    /// Make future calls to (target, selector) fail with `reason`.
    pub fn fail_calls_to(&mut self, target: Address, selector: Selector, reason: &str) {
        self.failures.insert((target, selector), reason.to_string());
    }

    /// Clear a configured failure.
    pub fn clear_failure(&mut self, target: &Address, selector: &Selector) {
        self.failures.remove(&(*target, *selector));
    }

    /// Number of checkpoints taken but not yet committed or rolled back.
    pub fn open_checkpoints(&self) -> usize {
        self.snapshots.len()
    }
}

impl Ledger for MemoryLedger {
    fn execute_call(&mut self, op: &Operation) -> Result<Vec<u8>, CallError> {
        if let Some(reason) = self.failures.get(&(op.target, op.payload.selector)) {
            return Err(CallError(reason.clone()));
        }
        let balance = self.balances.entry(op.target).or_insert(0);
        *balance = balance.saturating_add(op.value);
        self.calls.push((op.target, op.value, op.payload.selector));
        Ok(Vec::new())
    }

    fn checkpoint(&mut self) -> u64 {
        let id = self.snapshots.len() as u64;
        self.snapshots.push(Snapshot {
            balances: self.balances.clone(),
            calls_len: self.calls.len(),
        });
        id
    }

    fn rollback_to(&mut self, checkpoint: u64) {
        let idx = checkpoint as usize;
        if idx >= self.snapshots.len() {
            return;
        }
        let snapshot = self.snapshots[idx].clone();
        self.balances = snapshot.balances;
        self.calls.truncate(snapshot.calls_len);
        self.snapshots.truncate(idx);
    }

    fn commit(&mut self, checkpoint: u64) {
        self.snapshots.truncate(checkpoint as usize);
    }
}
