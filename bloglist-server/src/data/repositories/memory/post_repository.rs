use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreState, StoredPost};
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct InMemoryPostRepository {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryPostRepository {
    pub(super) fn new(state: Arc<RwLock<StoreState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state.write().await;
        if !state
            .accounts
            .iter()
            .any(|stored| stored.account.id == input.owner_id)
        {
            return Err(DomainError::Unauthorized);
        }

        let stored = StoredPost {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            url: input.url,
            likes: input.likes,
            owner_id: Some(input.owner_id),
            created_at: Utc::now(),
        };
        let post = state.to_post(&stored)?;
        state.posts.push(stored);
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let state = self.state.read().await;
        state
            .posts
            .iter()
            .find(|stored| stored.id == id)
            .map(|stored| state.to_post(stored))
            .transpose()
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|stored| stored.id != id);
        Ok(state.posts.len() < before)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let state = self.state.read().await;
        state
            .posts
            .iter()
            .map(|stored| state.to_post(stored))
            .collect()
    }
}
