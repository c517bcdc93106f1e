use async_trait::async_trait;

use crate::domain::account::Account;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct AccountCredentials {
    pub(crate) account: Account,
    pub(crate) credential_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewAccount {
    pub(crate) username: String,
    pub(crate) name: Option<String>,
    pub(crate) credential_hash: String,
}

#[async_trait]
pub(crate) trait AccountRepository: Send + Sync {
    /// Must fail with `DomainError::Conflict` when the username is taken,
    /// atomically with the insert.
    async fn create_account(&self, input: NewAccount) -> Result<Account, DomainError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountCredentials>, DomainError>;
    async fn list_accounts(&self) -> Result<Vec<Account>, DomainError>;
}
