use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use conclave_core::{AccessError, AccessResult, AccountId, RoleKey};
use conclave_domain::{AuditAction, RoleLedger};

use crate::{AdminRegistry, AuditEvent, AuditRepository};

/// Application service for quorum-gated role membership.
///
/// Owns the [`RoleLedger`] behind a single mutex so that every public
/// operation runs as one indivisible transition: the quorum counts a grant
/// or revoke reads can never be stale relative to a concurrently committed
/// vote. Caller identity is an explicit parameter on every operation; the
/// only ambient authority is the [`AdminRegistry`] collaborator, consulted
/// exclusively by [`RoleAccessService::set_role_maximum`].
#[derive(Clone)]
pub struct RoleAccessService {
    ledger: Arc<Mutex<RoleLedger>>,
    admin_registry: Arc<dyn AdminRegistry>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleAccessService {
    /// Creates a service with an empty ledger.
    #[must_use]
    pub fn new(
        admin_registry: Arc<dyn AdminRegistry>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(RoleLedger::new())),
            admin_registry,
            audit_repository,
        }
    }

    /// Sets or overwrites a role's capacity. Administrators only.
    ///
    /// Existing members stay in place even when the new maximum is below
    /// current membership; capacity binds future grants only.
    pub async fn set_role_maximum(
        &self,
        caller: AccountId,
        role: RoleKey,
        maximum: u64,
    ) -> AccessResult<()> {
        if !self.admin_registry.is_administrator(caller).await? {
            return Err(AccessError::Unauthorized(format!(
                "account '{caller}' is not a recognized administrator"
            )));
        }

        self.ledger.lock().await.set_maximum(role, maximum);
        info!(%caller, %role, maximum, "role maximum configured");

        self.audit_repository
            .append_event(AuditEvent {
                subject: caller,
                action: AuditAction::RoleMaximumConfigured,
                role,
                target: None,
                detail: Some(format!("set maximum to {maximum}")),
            })
            .await
    }

    /// Grants a role to an account once capacity and quorum allow it.
    pub async fn grant_role(
        &self,
        caller: AccountId,
        role: RoleKey,
        target: AccountId,
    ) -> AccessResult<()> {
        self.ledger.lock().await.grant(role, target)?;
        info!(%caller, %role, %target, "role granted");

        self.audit_repository
            .append_event(AuditEvent {
                subject: caller,
                action: AuditAction::RoleGranted,
                role,
                target: Some(target),
                detail: None,
            })
            .await
    }

    /// Revokes a role from an account once the rejection quorum allows it.
    pub async fn revoke_role(
        &self,
        caller: AccountId,
        role: RoleKey,
        target: AccountId,
    ) -> AccessResult<()> {
        self.ledger.lock().await.revoke(role, target)?;
        info!(%caller, %role, %target, "role revoked");

        self.audit_repository
            .append_event(AuditEvent {
                subject: caller,
                action: AuditAction::RoleRevoked,
                role,
                target: Some(target),
                detail: None,
            })
            .await
    }

    /// Removes the caller's own membership, bypassing any quorum.
    ///
    /// Strictly self-service: the caller must be the renounced account,
    /// checked before any membership state is inspected.
    pub async fn renounce_role(
        &self,
        caller: AccountId,
        role: RoleKey,
        account: AccountId,
    ) -> AccessResult<()> {
        if caller != account {
            return Err(AccessError::Unauthorized(format!(
                "account '{caller}' may not renounce on behalf of '{account}'"
            )));
        }

        self.ledger.lock().await.renounce(role, account)?;
        info!(%account, %role, "role renounced");

        self.audit_repository
            .append_event(AuditEvent {
                subject: account,
                action: AuditAction::RoleRenounced,
                role,
                target: None,
                detail: None,
            })
            .await
    }

    /// Records the caller's approval intent for granting `target` the role.
    ///
    /// Only current members may vote. Repeat casts overwrite the previous
    /// intent, so the call is idempotent with respect to quorum counts.
    pub async fn approve_role(
        &self,
        caller: AccountId,
        role: RoleKey,
        target: AccountId,
        intent: bool,
    ) -> AccessResult<()> {
        self.ledger
            .lock()
            .await
            .record_approval(role, caller, target, intent)?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: caller,
                action: AuditAction::ApprovalRecorded,
                role,
                target: Some(target),
                detail: Some(format!("intent {intent}")),
            })
            .await
    }

    /// Records the caller's rejection intent for revoking `target`'s role.
    ///
    /// Same voter rules as [`RoleAccessService::approve_role`].
    pub async fn reject_role(
        &self,
        caller: AccountId,
        role: RoleKey,
        target: AccountId,
        intent: bool,
    ) -> AccessResult<()> {
        self.ledger
            .lock()
            .await
            .record_rejection(role, caller, target, intent)?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: caller,
                action: AuditAction::RejectionRecorded,
                role,
                target: Some(target),
                detail: Some(format!("intent {intent}")),
            })
            .await
    }

    /// Returns whether an account currently holds a role. Never fails.
    pub async fn has_role(&self, role: RoleKey, account: AccountId) -> bool {
        self.ledger.lock().await.has_role(role, account)
    }
}
