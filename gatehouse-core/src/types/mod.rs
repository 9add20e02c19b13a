//! Protocol data types for the authorization engine.
//!
//! - [`Operation`] / [`BatchOperation`]: outbound call descriptors
//! - [`Approval`] / [`SignerEntry`]: weighted multi-party signature sets
//! - [`ExecutionRecord`]: per-call audit record

mod approval;
mod operation;
mod record;

pub use approval::{approval_digest, Approval, SignerEntry};
pub use operation::{BatchOperation, CallPayload, Operation, Selector};
pub use record::ExecutionRecord;
