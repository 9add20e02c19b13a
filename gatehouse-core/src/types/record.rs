//! Audit records emitted after execution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::Address;
use crate::types::Selector;

/// One record per executed sub-operation, consumed by external monitoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Destination of the executed call.
    pub target: Address,
    /// Native value carried by the call.
    pub value: u128,
    /// Entry point that was invoked.
    pub selector: Selector,
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "executed {} on {} with value {}",
            self.selector, self.target, self.value
        )
    }
}
