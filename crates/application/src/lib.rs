//! Application services and ports.

#![forbid(unsafe_code)]

mod ports;
mod role_access_service;

pub use ports::{AdminRegistry, AuditEvent, AuditRepository};
pub use role_access_service::RoleAccessService;
