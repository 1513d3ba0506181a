use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use conclave_application::AdminRegistry;
use conclave_core::{AccessResult, AccountId};

/// In-memory administrator registry.
///
/// Answers the single capability question the access-control core asks of
/// its collaborator. Composition roots and tests seed it directly.
#[derive(Debug, Default)]
pub struct InMemoryAdminRegistry {
    administrators: RwLock<HashSet<AccountId>>,
}

impl InMemoryAdminRegistry {
    /// Creates an empty registry with no administrators.
    #[must_use]
    pub fn new() -> Self {
        Self {
            administrators: RwLock::new(HashSet::new()),
        }
    }

    /// Registers an account as an administrator.
    pub async fn add_administrator(&self, account: AccountId) {
        self.administrators.write().await.insert(account);
    }

    /// Removes an account from the administrator set.
    pub async fn remove_administrator(&self, account: AccountId) {
        self.administrators.write().await.remove(&account);
    }
}

#[async_trait]
impl AdminRegistry for InMemoryAdminRegistry {
    async fn is_administrator(&self, account: AccountId) -> AccessResult<bool> {
        Ok(self.administrators.read().await.contains(&account))
    }
}

#[cfg(test)]
mod tests {
    use conclave_application::AdminRegistry;
    use conclave_core::AccountId;

    use super::InMemoryAdminRegistry;

    #[tokio::test]
    async fn added_account_is_recognized() {
        let registry = InMemoryAdminRegistry::new();
        let account = AccountId::new();

        registry.add_administrator(account).await;
        let recognized = registry.is_administrator(account).await;
        assert!(recognized.is_ok());
        assert!(recognized.unwrap_or(false));
    }

    #[tokio::test]
    async fn removed_account_is_no_longer_recognized() {
        let registry = InMemoryAdminRegistry::new();
        let account = AccountId::new();

        registry.add_administrator(account).await;
        registry.remove_administrator(account).await;

        let recognized = registry.is_administrator(account).await;
        assert!(recognized.is_ok());
        assert!(!recognized.unwrap_or(true));
    }

    #[tokio::test]
    async fn unknown_account_is_not_an_administrator() {
        let registry = InMemoryAdminRegistry::new();
        let recognized = registry.is_administrator(AccountId::new()).await;
        assert!(recognized.is_ok());
        assert!(!recognized.unwrap_or(true));
    }
}
