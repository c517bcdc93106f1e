use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostOwner};

const POST_COLUMNS: &str = r#"
    p.id,
    p.title,
    p.author,
    p.url,
    p.likes,
    p.created_at,
    a.id AS owner_id,
    a.username AS owner_username,
    a.name AS owner_name
"#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    author: String,
    url: String,
    likes: i64,
    created_at: DateTime<Utc>,
    owner_id: Option<Uuid>,
    owner_username: Option<String>,
    owner_name: Option<String>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (id, title, author, url, likes, owner_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, title, author, url, likes, owner_id, created_at
            )
            SELECT {POST_COLUMNS}
            FROM p
            LEFT JOIN accounts a ON a.id = p.owner_id
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.url)
            .bind(input.likes)
            .bind(input.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            LEFT JOIN accounts a ON a.id = p.owner_id
            WHERE p.id = $1
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            LEFT JOIN accounts a ON a.id = p.owner_id
            ORDER BY p.seq ASC
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let owner = match (row.owner_id, row.owner_username) {
        (Some(id), Some(username)) => Some(PostOwner {
            id,
            username,
            name: row.owner_name,
        }),
        _ => None,
    };

    Post::new(
        row.id,
        row.title,
        row.author,
        row.url,
        row.likes,
        owner,
        row.created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        // owner_id references an account that no longer exists
        if db_err.code().as_deref() == Some("23503") {
            return DomainError::Unauthorized;
        }
    }
    DomainError::Unexpected(err.to_string())
}
