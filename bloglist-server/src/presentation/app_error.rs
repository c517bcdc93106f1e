use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. }
                | DomainError::MissingFields(_)
                | DomainError::InvalidId(_)
                | DomainError::Conflict { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(%detail, "request failed with unexpected error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    fn status_of(err: DomainError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_distinct_statuses() {
        assert_eq!(status_of(DomainError::MissingFields(vec!["title"])), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::InvalidId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(DomainError::Conflict { field: "username" }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::Unexpected("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
