use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::account_repository::{AccountCredentials, AccountRepository, NewAccount};
use crate::domain::account::Account;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AccountCredentialsRow {
    id: Uuid,
    username: String,
    name: Option<String>,
    credential_hash: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create_account(&self, input: NewAccount) -> Result<Account, DomainError> {
        // Uniqueness is left to the accounts_username_key constraint so that
        // two concurrent registrations cannot both succeed.
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (id, username, name, credential_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(&input.name)
        .bind(&input.credential_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_account_db_error)?;

        map_row_to_account(row)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountCredentials>, DomainError> {
        let row = sqlx::query_as::<_, AccountCredentialsRow>(
            r#"
            SELECT
            id,
            username,
            name,
            credential_hash,
            created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_account_db_error)?;

        let Some(r) = row else {
            return Ok(None);
        };
        let account = Account::new(r.id, r.username, r.name, r.created_at)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(Some(AccountCredentials {
            account,
            credential_hash: r.credential_hash,
        }))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, DomainError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, name, created_at
            FROM accounts
            ORDER BY created_at ASC, username ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_account_db_error)?;

        rows.into_iter().map(map_row_to_account).collect()
    }
}

fn map_row_to_account(row: AccountRow) -> Result<Account, DomainError> {
    Account::new(row.id, row.username, row.name, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_account_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let field = match db_err.constraint() {
                Some("accounts_username_key") => "username",
                _ => "id",
            };
            return DomainError::Conflict { field };
        }
    }
    DomainError::Unexpected(err.to_string())
}
