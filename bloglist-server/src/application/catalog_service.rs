use std::sync::Arc;

use tracing::{info, warn};

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::account::ActingAccount;
use crate::domain::error::DomainError;
use crate::domain::parse_id;
use crate::domain::post::{CreatePostRequest, Post};
use crate::domain::stats::{self, PostStatistics};

pub(crate) struct CatalogService {
    repo: Arc<dyn PostRepository>,
}

impl CatalogService {
    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts().await
    }

    pub(crate) async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        let id = parse_id(id)?;
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn create_post(
        &self,
        acting: &ActingAccount,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let draft = req.validate()?;

        let new_post = NewPost {
            title: draft.title,
            author: draft.author,
            url: draft.url,
            likes: draft.likes,
            owner_id: acting.id,
        };
        let post = self.repo.create_post(new_post).await?;

        info!(post_id = %post.id, owner = %acting.username, "post created");
        Ok(post)
    }

    pub(crate) async fn delete_post(
        &self,
        acting: &ActingAccount,
        post_id: &str,
    ) -> Result<(), DomainError> {
        let post_id = parse_id(post_id)?;
        let original_post = self
            .repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;

        if let Err(err) = original_post.ensure_owned_by(acting.id) {
            warn!(%post_id, actor = %acting.username, "delete refused for non-owner");
            return Err(err);
        }

        // a concurrent delete may have won the race since the lookup
        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        info!(%post_id, owner = %acting.username, "post deleted");
        Ok(())
    }

    pub(crate) async fn statistics(&self) -> Result<PostStatistics, DomainError> {
        let posts = self.repo.list_posts().await?;
        Ok(stats::summarize(&posts))
    }
}
