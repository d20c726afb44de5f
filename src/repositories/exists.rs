//! ExistenceChecker - guards reads and mutations that depend on another row

use crate::core::AppError;
use crate::query::quote_ident;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

/// The rows that can be checked for existence. Each variant fixes the table
/// and column, so no identifier ever comes from the request.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    Topic(&'a str),
    User(&'a str),
    Article(i32),
    Comment(i32),
}

impl Lookup<'_> {
    pub fn table(&self) -> &'static str {
        match self {
            Lookup::Topic(_) => "topics",
            Lookup::User(_) => "users",
            Lookup::Article(_) => "articles",
            Lookup::Comment(_) => "comments",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Lookup::Topic(_) => "slug",
            Lookup::User(_) => "username",
            Lookup::Article(_) => "article_id",
            Lookup::Comment(_) => "comment_id",
        }
    }

    fn sql(&self) -> String {
        format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1)",
            quote_ident(self.table()),
            quote_ident(self.column())
        )
    }
}

pub struct ExistenceChecker {
    connection_pool: PgPool,
}

impl ExistenceChecker {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Succeeds if at least one row matches, otherwise fails with a generic
    /// `NotFound("Not Found")` that callers may remap. One query.
    #[instrument(skip(self))]
    pub async fn check(&self, lookup: Lookup<'_>) -> Result<(), AppError> {
        debug!("Checking row existence");
        let sql = lookup.sql();
        let query = sqlx::query_scalar::<_, bool>(&sql);
        let query = match lookup {
            Lookup::Topic(value) | Lookup::User(value) => query.bind(value),
            Lookup::Article(id) | Lookup::Comment(id) => query.bind(id),
        };

        if query.fetch_one(&self.connection_pool).await? {
            Ok(())
        } else {
            warn!(table = lookup.table(), "Referenced row not found");
            Err(AppError::not_found("Not Found"))
        }
    }
}
