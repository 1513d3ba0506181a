use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Opaque unique identifier for an account.
///
/// Accounts carry no key material here; identity verification happens
/// outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random account identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an account identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AccountId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Stable key identifying a role.
///
/// A role key is the SHA-256 digest of the role's human-readable name, so
/// the same name always maps to the same key without any registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleKey([u8; 32]);

impl RoleKey {
    /// Derives the role key for a human-readable role name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        Self(digest.into())
    }

    /// Creates a role key from raw digest bytes.
    #[must_use]
    pub fn from_bytes(value: [u8; 32]) -> Self {
        Self(value)
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for RoleKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(formatter, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountId, RoleKey};

    #[test]
    fn account_id_formats_as_uuid() {
        let account = AccountId::new();
        assert_eq!(account.to_string().len(), 36);
    }

    #[test]
    fn role_key_is_stable_for_a_name() {
        assert_eq!(RoleKey::from_name("OPERATOR"), RoleKey::from_name("OPERATOR"));
        assert_ne!(RoleKey::from_name("OPERATOR"), RoleKey::from_name("AUDITOR"));
    }

    #[test]
    fn role_key_displays_as_hex_digest() {
        let key = RoleKey::from_name("OPERATOR");
        let rendered = key.to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn role_key_round_trips_raw_bytes() {
        let key = RoleKey::from_name("OPERATOR");
        assert_eq!(RoleKey::from_bytes(*key.as_bytes()), key);
    }
}
