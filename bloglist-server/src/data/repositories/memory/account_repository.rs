use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreState, StoredAccount};
use crate::data::account_repository::{AccountCredentials, AccountRepository, NewAccount};
use crate::domain::account::Account;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct InMemoryAccountRepository {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryAccountRepository {
    pub(super) fn new(state: Arc<RwLock<StoreState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(&self, input: NewAccount) -> Result<Account, DomainError> {
        let mut state = self.state.write().await;
        if state
            .accounts
            .iter()
            .any(|stored| stored.account.username == input.username)
        {
            return Err(DomainError::Conflict { field: "username" });
        }

        let account = Account::new(Uuid::new_v4(), input.username, input.name, Utc::now())?;
        state.accounts.push(StoredAccount {
            account: account.clone(),
            credential_hash: input.credential_hash,
        });
        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountCredentials>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .iter()
            .find(|stored| stored.account.username == username)
            .map(|stored| AccountCredentials {
                account: stored.account.clone(),
                credential_hash: stored.credential_hash.clone(),
            }))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .iter()
            .map(|stored| stored.account.clone())
            .collect())
    }
}
