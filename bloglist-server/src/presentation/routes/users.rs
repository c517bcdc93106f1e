use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::login::login;
use crate::presentation::handlers::users::{list_users, register};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(register))
        .route("/api/login", post(login))
}
