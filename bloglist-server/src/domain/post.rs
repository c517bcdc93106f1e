use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

const MAX_TEXT_LEN: usize = 255;
/// Keeps per-author and collection-wide like totals well inside `i64`.
pub(crate) const MAX_LIKES: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct PostOwner {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
    pub(crate) owner: Option<PostOwner>,
    pub(crate) created_at: DateTime<Utc>,
}

/// Raw create input. Every field is optional so that absence is reported as a
/// validation failure instead of a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) likes: Option<i64>,
}

/// A create request that passed validation, with `likes` defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostDraft {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<PostDraft, DomainError> {
        let title = non_blank(self.title);
        let author = non_blank(self.author);
        let url = non_blank(self.url);

        let missing: Vec<&'static str> = [
            ("title", title.is_none()),
            ("author", author.is_none()),
            ("url", url.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (title, author, url) {
            (Some(title), Some(author), Some(url)) => Ok(PostDraft {
                title: check_len("title", title)?,
                author: check_len("author", author)?,
                url,
                likes: validate_likes(self.likes.unwrap_or(0))?,
            }),
            _ => Err(DomainError::MissingFields(missing)),
        }
    }
}

impl Post {
    pub(crate) fn new(
        id: Uuid,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        likes: i64,
        owner: Option<PostOwner>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let draft = CreatePostRequest {
            title: Some(title.into()),
            author: Some(author.into()),
            url: Some(url.into()),
            likes: Some(likes),
        }
        .validate()?;

        Ok(Self {
            id,
            title: draft.title,
            author: draft.author,
            url: draft.url,
            likes: draft.likes,
            owner,
            created_at,
        })
    }

    pub(crate) fn owner_id(&self) -> Option<Uuid> {
        self.owner.as_ref().map(|owner| owner.id)
    }

    /// Only the creating account may remove a post. Orphaned posts belong
    /// to nobody.
    pub(crate) fn ensure_owned_by(&self, account_id: Uuid) -> Result<(), DomainError> {
        match self.owner_id() {
            Some(owner_id) if owner_id == account_id => Ok(()),
            _ => Err(DomainError::Forbidden),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn check_len(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::Validation {
            field,
            message: "must be at most 255 chars",
        });
    }
    Ok(value)
}

fn validate_likes(likes: i64) -> Result<i64, DomainError> {
    if likes < 0 {
        return Err(DomainError::Validation {
            field: "likes",
            message: "must be >= 0",
        });
    }
    if likes > MAX_LIKES {
        return Err(DomainError::Validation {
            field: "likes",
            message: "must be at most 2147483647",
        });
    }
    Ok(likes)
}
