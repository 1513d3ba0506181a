//! Shared primitives for all Rust crates in Conclave.

#![forbid(unsafe_code)]

/// Identifier types shared across services.
pub mod identity;

use thiserror::Error;

pub use identity::{AccountId, RoleKey};

/// Result type used across Conclave crates.
pub type AccessResult<T> = Result<T, AccessError>;

/// Failure kinds surfaced by role-membership operations.
///
/// Every failure is a synchronous precondition rejection: the operation
/// that returned it has written nothing.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Caller failed a capability or self-identity check.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Target account already holds a role somewhere in the system.
    #[error("already has role: {0}")]
    AlreadyHasRole(String),

    /// Granting would push membership past the role maximum.
    #[error("capacity overflow: {0}")]
    CapacityOverflow(String),

    /// Target account does not hold the role in question.
    #[error("not a holder: {0}")]
    NotAHolder(String),

    /// The required vote threshold has not been reached.
    #[error("quorum not met: {0}")]
    QuorumNotMet(String),
}

#[cfg(test)]
mod tests {
    use super::AccessError;

    #[test]
    fn error_display_includes_detail() {
        let error = AccessError::QuorumNotMet("2 approvals required".to_owned());
        assert_eq!(error.to_string(), "quorum not met: 2 approvals required");
    }
}
