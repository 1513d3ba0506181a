use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when an administrator configures a role maximum.
    RoleMaximumConfigured,
    /// Emitted when an account is granted a role.
    RoleGranted,
    /// Emitted when an account is revoked from a role.
    RoleRevoked,
    /// Emitted when an account renounces its own role.
    RoleRenounced,
    /// Emitted when a member records an approval vote for a candidate.
    ApprovalRecorded,
    /// Emitted when a member records a rejection vote against a holder.
    RejectionRecorded,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleMaximumConfigured => "role.maximum_configured",
            Self::RoleGranted => "role.granted",
            Self::RoleRevoked => "role.revoked",
            Self::RoleRenounced => "role.renounced",
            Self::ApprovalRecorded => "role.approval_recorded",
            Self::RejectionRecorded => "role.rejection_recorded",
        }
    }

    /// Parses a storage value back into an action.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "role.maximum_configured" => Some(Self::RoleMaximumConfigured),
            "role.granted" => Some(Self::RoleGranted),
            "role.revoked" => Some(Self::RoleRevoked),
            "role.renounced" => Some(Self::RoleRenounced),
            "role.approval_recorded" => Some(Self::ApprovalRecorded),
            "role.rejection_recorded" => Some(Self::RejectionRecorded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuditAction;

    #[test]
    fn audit_action_roundtrip_storage_value() {
        let action = AuditAction::RoleGranted;
        let restored = AuditAction::parse(action.as_str());
        assert_eq!(restored, Some(action));
    }

    #[test]
    fn unknown_audit_action_is_rejected() {
        assert!(AuditAction::parse("role.unknown").is_none());
    }
}
