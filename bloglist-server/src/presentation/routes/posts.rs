use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, post_statistics,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/blogs", get(list_posts))
        .route("/api/blogs/stats", get(post_statistics))
        .route("/api/blogs/{id}", get(get_post));

    let protected = Router::new()
        .route("/api/blogs", post(create_post))
        .route("/api/blogs/{id}", delete(delete_post))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
