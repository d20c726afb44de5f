//! Application State - shared across every route

use crate::repositories::{
    ArticleRepository, CommentRepository, ExistenceChecker, TopicRepository, UserRepository,
};
use sqlx::PgPool;

/// Global application state shared by all handlers.
///
/// Holds no mutable data: every field wraps the same connection pool.
pub struct AppState {
    /// Repository for topics
    pub topic: TopicRepository,

    /// Repository for users (read-only)
    pub user: UserRepository,

    /// Repository for articles
    pub article: ArticleRepository,

    /// Repository for comments
    pub comment: CommentRepository,

    /// Row existence guard used before mutations and filtered reads
    pub exists: ExistenceChecker,
}

impl AppState {
    /// Builds every repository on top of the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            topic: TopicRepository::new(pool.clone()),
            user: UserRepository::new(pool.clone()),
            article: ArticleRepository::new(pool.clone()),
            comment: CommentRepository::new(pool.clone()),
            exists: ExistenceChecker::new(pool),
        }
    }
}
