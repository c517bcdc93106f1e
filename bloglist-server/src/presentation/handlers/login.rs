use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::account::LoginRequest;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) token: String,
    pub(crate) username: String,
    pub(crate) name: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "users",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid username or password"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<LoginResponseDto>)> {
    let Json(dto) = payload?;

    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.account_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponseDto {
            token: result.access_token,
            username: result.account.username,
            name: result.account.name,
        }),
    ))
}
