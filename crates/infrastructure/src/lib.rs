//! In-memory infrastructure adapters.

#![forbid(unsafe_code)]

mod in_memory_admin_registry;
mod in_memory_audit_log;

pub use in_memory_admin_registry::InMemoryAdminRegistry;
pub use in_memory_audit_log::{AuditLogEntry, InMemoryAuditLog};
