//! DTOs module - Data Transfer Objects
//!
//! DTOs separate what the API accepts and returns from the entities stored in
//! the database.

pub mod article;
pub mod comment;
pub mod query;
pub mod topic;
pub mod votes;

// Re-exports for easier imports
pub use article::{ArticleDTO, ArticleListDTO, ArticleSummaryDTO, CreateArticleDTO};
pub use comment::{CommentListDTO, CreateCommentDTO, CreateCommentRequestDTO, UpdatedCommentDTO};
pub use query::{ArticlesQuery, PaginationQuery};
pub use topic::CreateTopicDTO;
pub use votes::VotesDTO;
