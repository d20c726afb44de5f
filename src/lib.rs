//! News API library - exposes the router and its modules for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod query;
pub mod repositories;
pub mod services;
pub mod validation;

pub use crate::core::{AppError, AppState, Config};

use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router.
///
/// Unknown paths and unsupported methods on known paths both answer 404.
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::{get_endpoints, not_found};

    Router::new()
        .route("/api", get(get_endpoints))
        .merge(configure_topic_routes())
        .merge(configure_article_routes())
        .merge(configure_comment_routes())
        .merge(configure_user_routes())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn configure_topic_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new().route("/api/topics", get(list_topics).post(create_topic))
}

fn configure_article_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/{article_id}",
            get(get_article_by_id)
                .patch(update_article_votes)
                .delete(delete_article_by_id),
        )
        .route(
            "/api/articles/{article_id}/comments",
            get(list_comments_for_article).post(create_comment),
        )
}

fn configure_comment_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new().route(
        "/api/comments/{comment_id}",
        patch(update_comment_votes).delete(delete_comment_by_id),
    )
}

fn configure_user_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{username}", get(get_user_by_username))
}
