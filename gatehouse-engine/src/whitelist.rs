//! Immutable allow-list of permitted call destinations.
//!
//! The whitelist is set exactly once, at construction, from caller-supplied
//! entries and never mutated afterward. That is a design invariant of the
//! type, not an access-control decision: no mutating method exists.

use std::collections::HashMap;
use std::sync::Arc;

use gatehouse_core::{Address, Operation, Selector};

use crate::error::{EngineError, EngineResult};

/// Parameter-validation capability attached to a whitelist entry.
///
/// Implementations decode the operation's arguments or validation payload
/// and decide whether the concrete parameters are acceptable. The engine
/// depends only on this trait, never on concrete validators.
pub trait ParameterValidator {
    /// Return true if the operation's parameters are acceptable.
    fn validate(&self, op: &Operation) -> bool;
}

/// Validator that accepts every operation.
pub struct AllowAll;

impl ParameterValidator for AllowAll {
    fn validate(&self, _op: &Operation) -> bool {
        true
    }
}

impl<F> ParameterValidator for F
where
    F: Fn(&Operation) -> bool,
{
    fn validate(&self, op: &Operation) -> bool {
        self(op)
    }
}

/// One target and the entry points allowed on it.
pub struct WhitelistEntry {
    target: Address,
    selectors: Vec<(Selector, Option<Arc<dyn ParameterValidator>>)>,
}

impl WhitelistEntry {
    /// Start an entry for `target` with no allowed selectors.
    pub fn new(target: Address) -> Self {
        Self {
            target,
            selectors: Vec::new(),
        }
    }

    /// Allow `selector` on this target with no parameter validation.
    pub fn allow(mut self, selector: Selector) -> Self {
        self.selectors.push((selector, None));
        self
    }

    /// Allow `selector` on this target, gated by `validator`.
    pub fn allow_with(
        mut self,
        selector: Selector,
        validator: Arc<dyn ParameterValidator>,
    ) -> Self {
        self.selectors.push((selector, Some(validator)));
        self
    }
}

/// Immutable mapping from (target, selector) to an optional validator.
///
/// Duplicate (target, selector) pairs at construction are idempotent; when a
/// pair repeats, the last supplied validator wins.
pub struct WhitelistRegistry {
    entries: HashMap<(Address, Selector), Option<Arc<dyn ParameterValidator>>>,
}

impl WhitelistRegistry {
    /// Build the registry from its one-time construction data.
    pub fn new(entries: Vec<WhitelistEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            for (selector, validator) in entry.selectors {
                map.insert((entry.target, selector), validator);
            }
        }
        Self { entries: map }
    }

    /// An empty registry that permits nothing.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Is the (target, selector) pair permitted?
    pub fn is_allowed(&self, target: &Address, selector: &Selector) -> bool {
        self.entries.contains_key(&(*target, *selector))
    }

    /// The parameter validator configured for a pair, if any.
    pub fn parameter_validator(
        &self,
        target: &Address,
        selector: &Selector,
    ) -> Option<&dyn ParameterValidator> {
        self.entries
            .get(&(*target, *selector))
            .and_then(|v| v.as_deref())
    }

    /// Check one operation against the whitelist and its validator.
    pub fn check(&self, op: &Operation) -> EngineResult<()> {
        let key = (op.target, op.payload.selector);
        match self.entries.get(&key) {
            None => Err(EngineError::NotWhitelisted {
                target: op.target,
                selector: op.payload.selector,
            }),
            Some(None) => Ok(()),
            Some(Some(validator)) => {
                if validator.validate(op) {
                    Ok(())
                } else {
                    Err(EngineError::ParameterRejected {
                        target: op.target,
                        selector: op.payload.selector,
                    })
                }
            }
        }
    }

    /// Number of permitted (target, selector) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the registry permits nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
