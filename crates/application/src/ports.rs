use async_trait::async_trait;
use conclave_core::{AccessResult, AccountId, RoleKey};
use conclave_domain::AuditAction;

/// Collaborator port answering "is this identity an administrator?".
///
/// Consumed only by the role-maximum configuration path; membership and
/// vote operations never consult it.
#[async_trait]
pub trait AdminRegistry: Send + Sync {
    /// Returns whether the account is a recognized administrator.
    async fn is_administrator(&self, account: AccountId) -> AccessResult<bool>;
}

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Account that performed the action.
    pub subject: AccountId,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Role the action applied to.
    pub role: RoleKey,
    /// Account the action targeted, when distinct from the subject.
    pub target: Option<AccountId>,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AccessResult<()>;
}
