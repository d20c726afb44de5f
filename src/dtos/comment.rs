//! Comment DTOs

use crate::entities::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/articles/{article_id}/comments`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateCommentRequestDTO {
    #[validate(length(max = 250, message = "Username must be at most 250 characters"))]
    pub username: String,
    pub body: String,
}

/// DTO for inserting a comment (without comment_id, created_at, votes)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateCommentDTO {
    pub article_id: i32,
    pub author: String,
    pub body: String,
}

impl CreateCommentDTO {
    pub fn new(article_id: i32, request: CreateCommentRequestDTO) -> Self {
        Self {
            article_id,
            author: request.username,
            body: request.body,
        }
    }
}

/// Comment as returned after a vote update (article_id omitted)
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct UpdatedCommentDTO {
    pub comment_id: i32,
    pub body: String,
    pub votes: i32,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// One page of comments together with the number of comments on the article
#[derive(Serialize, Debug)]
pub struct CommentListDTO {
    pub comments: Vec<Comment>,
    pub total_count: i64,
}
