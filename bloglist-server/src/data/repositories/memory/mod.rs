//! Process-local store used when no database is configured and by tests.
//!
//! Each repository call takes the lock once, so check-then-write sequences
//! (username uniqueness, delete) are atomic with respect to other callers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostOwner};

pub(crate) mod account_repository;
pub(crate) mod post_repository;

pub(crate) use account_repository::InMemoryAccountRepository;
pub(crate) use post_repository::InMemoryPostRepository;

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    credential_hash: String,
}

#[derive(Debug, Clone)]
struct StoredPost {
    id: Uuid,
    title: String,
    author: String,
    url: String,
    likes: i64,
    owner_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreState {
    accounts: Vec<StoredAccount>,
    posts: Vec<StoredPost>,
}

impl StoreState {
    fn owner_of(&self, owner_id: Option<Uuid>) -> Option<PostOwner> {
        let owner_id = owner_id?;
        self.accounts
            .iter()
            .find(|stored| stored.account.id == owner_id)
            .map(|stored| PostOwner {
                id: stored.account.id,
                username: stored.account.username.clone(),
                name: stored.account.name.clone(),
            })
    }

    fn to_post(&self, stored: &StoredPost) -> Result<Post, DomainError> {
        Post::new(
            stored.id,
            stored.title.clone(),
            stored.author.clone(),
            stored.url.clone(),
            stored.likes,
            self.owner_of(stored.owner_id),
            stored.created_at,
        )
        .map_err(|err| DomainError::Unexpected(err.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn post_repository(&self) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.state.clone())
    }

    pub(crate) fn account_repository(&self) -> InMemoryAccountRepository {
        InMemoryAccountRepository::new(self.state.clone())
    }
}
