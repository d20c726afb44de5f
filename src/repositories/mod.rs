//! Repositories module - one repository per table
//!
//! Every repository wraps the shared `PgPool` and returns `sqlx::Error`;
//! handlers translate absence and store failures into `AppError`.
//!
//! Queries are written with the runtime `sqlx::query_as::<_, T>` API and
//! `FromRow`, so the crate builds without a live database.

pub mod article;
pub mod comment;
pub mod exists;
pub mod topic;
pub mod traits;
pub mod user;

pub use traits::{Create, Delete, Read, ReadAll, Update};

pub use article::ArticleRepository;
pub use comment::CommentRepository;
pub use exists::{ExistenceChecker, Lookup};
pub use topic::TopicRepository;
pub use user::UserRepository;
