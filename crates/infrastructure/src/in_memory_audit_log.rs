use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use conclave_application::{AuditEvent, AuditRepository};
use conclave_core::AccessResult;

/// Stored audit entry with the identifiers assigned at append time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// Stable event identifier.
    pub event_id: String,
    /// Event payload as emitted by the application service.
    pub event: AuditEvent,
    /// Append timestamp in RFC3339.
    pub created_at: String,
}

/// In-memory append-only audit log.
///
/// Logs each appended event to tracing output, which makes it a usable
/// development sink as well as a test double.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLog {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Returns the most recent entries, newest first.
    pub async fn list_recent_entries(&self, limit: usize) -> Vec<AuditLogEntry> {
        let entries = self.entries.read().await;
        entries.iter().rev().take(limit).cloned().collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditLog {
    async fn append_event(&self, event: AuditEvent) -> AccessResult<()> {
        let entry = AuditLogEntry {
            event_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            event,
        };

        info!(
            event_id = entry.event_id,
            action = entry.event.action.as_str(),
            subject = %entry.event.subject,
            role = %entry.event.role,
            "audit event appended"
        );

        self.entries.write().await.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use conclave_application::{AuditEvent, AuditRepository};
    use conclave_core::{AccountId, RoleKey};
    use conclave_domain::AuditAction;

    use super::InMemoryAuditLog;

    fn event(action: AuditAction) -> AuditEvent {
        AuditEvent {
            subject: AccountId::new(),
            action,
            role: RoleKey::from_name("OPERATOR"),
            target: None,
            detail: None,
        }
    }

    #[tokio::test]
    async fn appended_events_are_listed_newest_first() {
        let log = InMemoryAuditLog::new();

        assert!(log.append_event(event(AuditAction::RoleGranted)).await.is_ok());
        assert!(log.append_event(event(AuditAction::RoleRevoked)).await.is_ok());

        let entries = log.list_recent_entries(10).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event.action, AuditAction::RoleRevoked);
        assert_eq!(entries[1].event.action, AuditAction::RoleGranted);
    }

    #[tokio::test]
    async fn listing_honors_the_limit() {
        let log = InMemoryAuditLog::new();
        for _ in 0..5 {
            assert!(log.append_event(event(AuditAction::RoleGranted)).await.is_ok());
        }

        assert_eq!(log.list_recent_entries(3).await.len(), 3);
    }

    #[tokio::test]
    async fn entries_carry_an_id_and_timestamp() {
        let log = InMemoryAuditLog::new();
        assert!(log.append_event(event(AuditAction::RoleGranted)).await.is_ok());

        let entries = log.list_recent_entries(1).await;
        assert_eq!(entries[0].event_id.len(), 36);
        assert!(entries[0].created_at.contains('T'));
    }
}
