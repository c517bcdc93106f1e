use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::account::ActingAccount;
use crate::domain::post::{CreatePostRequest, Post, PostOwner};
use crate::domain::stats::PostStatistics;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(max = 255))]
    pub(crate) author: Option<String>,
    pub(crate) url: Option<String>,
    #[validate(range(min = 0, max = 2_147_483_647))]
    pub(crate) likes: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct OwnerDto {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
    pub(crate) owner: Option<OwnerDto>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FavoritePostDto {
    pub(crate) title: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorPostsDto {
    pub(crate) author: String,
    pub(crate) blogs: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorLikesDto {
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostStatisticsDto {
    pub(crate) total_likes: i64,
    pub(crate) favorite_blog: Option<FavoritePostDto>,
    pub(crate) most_blogs: Option<AuthorPostsDto>,
    pub(crate) most_likes: Option<AuthorLikesDto>,
}

impl From<PostOwner> for OwnerDto {
    fn from(owner: PostOwner) -> Self {
        Self {
            id: owner.id,
            username: owner.username,
            name: owner.name,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            url: post.url,
            likes: post.likes,
            owner: post.owner.map(OwnerDto::from),
            created_at: post.created_at,
        }
    }
}

impl From<PostStatistics> for PostStatisticsDto {
    fn from(stats: PostStatistics) -> Self {
        Self {
            total_likes: stats.total_likes,
            favorite_blog: stats.favorite_post.map(|favorite| FavoritePostDto {
                title: favorite.title,
                likes: favorite.likes,
            }),
            most_blogs: stats.most_prolific_author.map(|top| AuthorPostsDto {
                author: top.author,
                blogs: top.count,
            }),
            most_likes: stats.most_liked_author.map(|top| AuthorLikesDto {
                author: top.author,
                likes: top.likes,
            }),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "blogs",
    responses(
        (status = 200, description = "All posts in insertion order", body = [PostDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.catalog_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.catalog_service.get_post(&id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        author: dto.author,
        url: dto.url,
        likes: dto.likes,
    };

    let acting: ActingAccount = auth.into();
    let post = state.catalog_service.create_post(&acting, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let acting: ActingAccount = auth.into();
    state.catalog_service.delete_post(&acting, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    tag = "blogs",
    responses(
        (status = 200, description = "Aggregates over all posts", body = PostStatisticsDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn post_statistics(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<PostStatisticsDto>)> {
    let stats = state.catalog_service.statistics().await?;

    Ok((StatusCode::OK, Json(PostStatisticsDto::from(stats))))
}
