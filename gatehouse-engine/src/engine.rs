//! The execution engine: authorization gates plus the call pipeline.
//!
//! State machine per top-level call: Idle → Authorizing (whitelist and/or
//! quorum, per configured mode) → Executing (context flag open, hook
//! pre-check, raw call, hook post-check per sub-operation) → Idle. The
//! context flag is the sole concurrency primitive: it is set before any
//! external call is made and cleared through a scope-exit guard, so every
//! failure path still closes the reentrancy window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gatehouse_core::{Address, Approval, BatchOperation, ExecutionRecord, Operation};

use crate::error::{EngineError, EngineResult};
use crate::governance::GovernanceAction;
use crate::hooks::HookModule;
use crate::ledger::Ledger;
use crate::quorum::SignatureQuorumValidator;
use crate::signers::SignerRegistry;
use crate::whitelist::WhitelistRegistry;

/// Which authorization gates apply to top-level operations.
///
/// When both are configured, both must pass; neither overrides the other.
/// Operations targeting the engine itself (governance) always require
/// quorum, in every mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationMode {
    /// Only the static whitelist is consulted.
    WhitelistOnly,
    /// Only the signature quorum is consulted.
    QuorumOnly,
    /// Both gates must pass.
    Both,
}

/// Construction-time configuration of an engine instance.
pub struct EngineConfig {
    /// Chain identifier approvals are bound to.
    pub chain_id: u64,
    /// This engine instance's own address.
    pub address: Address,
    /// Which authorization gates apply.
    pub mode: AuthorizationMode,
    /// The immutable whitelist (may be empty in quorum-only mode).
    pub whitelist: WhitelistRegistry,
    /// The initial signer set and quorum threshold.
    pub signers: SignerRegistry,
    /// Optional pre/post-call hook.
    pub hook: Option<Arc<dyn HookModule>>,
}

/// Clears the execution-context flag on scope exit, on every path.
struct ContextGuard(Arc<AtomicBool>);

impl Drop for ContextGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The operation authorization and execution engine.
///
/// Accepts a single operation or an atomic batch, authorizes it per the
/// configured mode, runs it through the ledger with the hook protocol, and
/// emits one audit record per executed sub-operation. Execution is
/// single-threaded per call stack; no two top-level calls run concurrently
/// against the same instance.
pub struct ExecutionEngine {
    chain_id: u64,
    address: Address,
    mode: AuthorizationMode,
    whitelist: WhitelistRegistry,
    signers: SignerRegistry,
    quorum: SignatureQuorumValidator,
    hook: Option<Arc<dyn HookModule>>,
    in_flight: Arc<AtomicBool>,
}

impl ExecutionEngine {
    /// Create an engine from its construction-time configuration.
    pub fn new(config: EngineConfig) -> Self {
        let quorum = SignatureQuorumValidator::new(config.chain_id, config.address);
        Self {
            chain_id: config.chain_id,
            address: config.address,
            mode: config.mode,
            whitelist: config.whitelist,
            signers: config.signers,
            quorum,
            hook: config.hook,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// This engine instance's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Chain identifier approvals are bound to.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The configured authorization mode.
    pub fn mode(&self) -> AuthorizationMode {
        self.mode
    }

    /// The current signer registry.
    pub fn signers(&self) -> &SignerRegistry {
        &self.signers
    }

    /// The immutable whitelist.
    pub fn whitelist(&self) -> &WhitelistRegistry {
        &self.whitelist
    }

    /// The quorum validator (watermark and nonce state).
    pub fn quorum(&self) -> &SignatureQuorumValidator {
        &self.quorum
    }

    /// The configured hook identity, if a hook is installed.
    pub fn hook_identity(&self) -> Option<Address> {
        self.hook.as_ref().map(|h| h.identity())
    }

    /// Is an execution context currently open?
    pub fn is_executing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Execute a single operation.
    ///
    /// `approval` is required whenever the quorum gate applies (quorum mode,
    /// both-gates mode, or an engine-targeted governance operation).
    pub fn execute(
        &mut self,
        caller: Address,
        op: &Operation,
        approval: Option<&Approval>,
        ledger: &mut dyn Ledger,
        now: u64,
    ) -> EngineResult<ExecutionRecord> {
        let mut records = self.enter(
            caller,
            std::slice::from_ref(op),
            op.digest(),
            approval,
            ledger,
            now,
        )?;
        Ok(records.remove(0))
    }

    /// Execute an atomic batch: all-or-nothing.
    ///
    /// One approval covers the whole batch, bound to the batch digest. Any
    /// sub-operation failure aborts every effect of the batch.
    pub fn execute_batch(
        &mut self,
        caller: Address,
        batch: &BatchOperation,
        approval: Option<&Approval>,
        ledger: &mut dyn Ledger,
        now: u64,
    ) -> EngineResult<Vec<ExecutionRecord>> {
        if batch.operations.is_empty() {
            return Err(EngineError::EmptyBatch);
        }
        self.enter(
            caller,
            &batch.operations,
            batch.digest(),
            approval,
            ledger,
            now,
        )
    }

    fn enter(
        &mut self,
        caller: Address,
        ops: &[Operation],
        payload_digest: [u8; 32],
        approval: Option<&Approval>,
        ledger: &mut dyn Ledger,
        now: u64,
    ) -> EngineResult<Vec<ExecutionRecord>> {
        let nested = self.is_executing();
        if nested {
            // Trusted bypass: exactly the configured hook identity, and only
            // while the context is open. Authorization is skipped (the outer
            // call already passed it) but the hook protocol still applies.
            let from_hook = self
                .hook
                .as_ref()
                .is_some_and(|h| h.identity() == caller);
            if !from_hook {
                tracing::warn!(caller = %caller, "reentrant call rejected");
                return Err(EngineError::NestedCallNotPermitted { caller });
            }
        } else {
            self.authorize(ops, &payload_digest, approval, now)?;
        }

        // Every frame is atomic: ledger effects and governance effects of a
        // failed frame are undone together. Quorum replay state is not
        // restored; a failed submission burns its approval.
        let checkpoint = ledger.checkpoint();
        let signers_snapshot = self.signers.clone();

        let _guard = if nested {
            None
        } else {
            self.in_flight.store(true, Ordering::Release);
            Some(ContextGuard(Arc::clone(&self.in_flight)))
        };

        let result = self.run_ops(caller, ops, ledger);
        match &result {
            Ok(records) => {
                ledger.commit(checkpoint);
                for record in records {
                    tracing::info!(
                        target = %record.target,
                        value = record.value,
                        selector = %record.selector,
                        "operation executed"
                    );
                }
            }
            Err(e) => {
                ledger.rollback_to(checkpoint);
                self.signers = signers_snapshot;
                tracing::warn!(error = %e, "execution aborted, effects rolled back");
            }
        }
        result
    }

    /// The Authorizing phase: whitelist and/or quorum per configured mode.
    fn authorize(
        &mut self,
        ops: &[Operation],
        payload_digest: &[u8; 32],
        approval: Option<&Approval>,
        now: u64,
    ) -> EngineResult<()> {
        let has_governance = ops.iter().any(|op| op.target == self.address);
        let needs_whitelist = matches!(
            self.mode,
            AuthorizationMode::WhitelistOnly | AuthorizationMode::Both
        );
        let needs_quorum = has_governance
            || matches!(
                self.mode,
                AuthorizationMode::QuorumOnly | AuthorizationMode::Both
            );

        if needs_whitelist {
            for op in ops {
                // Engine-targeted governance is gated by quorum below, not
                // by the whitelist.
                if op.target == self.address {
                    continue;
                }
                self.whitelist.check(op)?;
            }
        }

        if needs_quorum {
            let approval = approval.ok_or(EngineError::ApprovalRequired)?;
            self.quorum
                .verify(payload_digest, approval, &self.signers, now)?;
        }

        tracing::debug!(
            operations = ops.len(),
            governance = has_governance,
            "authorization passed"
        );
        Ok(())
    }

    fn run_ops(
        &mut self,
        caller: Address,
        ops: &[Operation],
        ledger: &mut dyn Ledger,
    ) -> EngineResult<Vec<ExecutionRecord>> {
        let mut records = Vec::with_capacity(ops.len());
        for op in ops {
            records.push(self.run_one(caller, op, ledger)?);
        }
        Ok(records)
    }

    /// The Executing phase for one sub-operation: hook pre-check, raw call
    /// (or governance commit), hook post-check.
    fn run_one(
        &mut self,
        caller: Address,
        op: &Operation,
        ledger: &mut dyn Ledger,
    ) -> EngineResult<ExecutionRecord> {
        let hook = self.hook.clone();

        let ctx = match &hook {
            Some(h) => Some(
                h.pre_check(self, &mut *ledger, op, &caller)
                    .map_err(|e| EngineError::HookRejected {
                        reason: e.to_string(),
                    })?,
            ),
            None => None,
        };

        if op.target == self.address {
            let action = GovernanceAction::decode(op)?;
            self.apply_governance(action)?;
        } else {
            ledger
                .execute_call(op)
                .map_err(|e| EngineError::CallFailed { reason: e.0 })?;
        }

        if let (Some(h), Some(ctx)) = (&hook, ctx) {
            h.post_check(self, &mut *ledger, ctx)
                .map_err(|e| EngineError::HookRejected {
                    reason: e.to_string(),
                })?;
        }

        Ok(ExecutionRecord {
            target: op.target,
            value: op.value,
            selector: op.payload.selector,
        })
    }

    fn apply_governance(&mut self, action: GovernanceAction) -> EngineResult<()> {
        match &action {
            GovernanceAction::SetSigner { signer, weight } => {
                self.signers.set_signer(*signer, *weight)?;
            }
            GovernanceAction::RemoveSigner { signer } => {
                self.signers.remove_signer(signer)?;
            }
            GovernanceAction::SetQuorum { threshold } => {
                self.signers.set_quorum(*threshold)?;
            }
        }
        tracing::info!(?action, "governance action applied");
        Ok(())
    }
}
