//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod ledger;

pub use audit::AuditAction;
pub use ledger::RoleLedger;
