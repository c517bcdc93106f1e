use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::account::{Account, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(length(max = 128))]
    pub(crate) name: Option<String>,
    #[validate(length(min = 3, max = 128))]
    pub(crate) password: String,
}

/// Public account view. Never carries the credential hash.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AccountDto {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) name: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            name: account.name,
            created_at: account.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AccountDto),
        (status = 400, description = "Validation error or username already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AccountDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        name: dto.name,
        password: dto.password,
    };

    let account = state.account_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(AccountDto::from(account))))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All accounts", body = [AccountDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<AccountDto>>)> {
    let accounts = state.account_service.list_accounts().await?;

    Ok((
        StatusCode::OK,
        Json(accounts.into_iter().map(AccountDto::from).collect()),
    ))
}
