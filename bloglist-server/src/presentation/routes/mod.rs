use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;

pub(crate) mod posts;
pub(crate) mod users;

/// Liveness probe plus every `/api` route, with state applied.
pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(liveness))
        .merge(users::router())
        .merge(posts::router(state.clone()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness { status: "ok" })
}
