//! Entities module - domain entities
//!
//! Every entity maps one row of a table in the relational store.

pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

// Re-exports for easier imports
pub use article::Article;
pub use comment::Comment;
pub use topic::Topic;
pub use user::User;
