//! CommentRepository - comments belong to exactly one article

use super::{Create, Delete, Update};
use crate::dtos::{CommentListDTO, CreateCommentDTO, UpdatedCommentDTO, VotesDTO};
use crate::entities::Comment;
use crate::query::{CommentPageRow, Pagination, collect_comments, list_comments};
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};

pub struct CommentRepository {
    connection_pool: PgPool,
}

impl CommentRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Comments of an article, newest first, with the article's comment total
    #[instrument(skip(self), fields(article_id = %article_id))]
    pub async fn list_for_article(
        &self,
        article_id: i32,
        pagination: Pagination,
    ) -> Result<CommentListDTO, Error> {
        debug!("Listing comments for article");
        let mut query_builder = list_comments(article_id, pagination);
        let rows = query_builder
            .build_query_as::<CommentPageRow>()
            .fetch_all(&self.connection_pool)
            .await?;

        let (comments, total_count) = collect_comments(rows);
        Ok(CommentListDTO {
            comments,
            total_count,
        })
    }
}

impl Create<Comment, CreateCommentDTO> for CommentRepository {
    #[instrument(skip(self, data), fields(article_id = %data.article_id, author = %data.author))]
    async fn create(&self, data: &CreateCommentDTO) -> Result<Comment, Error> {
        debug!("Creating new comment");
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, author, body)
            VALUES ($1, $2, $3)
            RETURNING comment_id, article_id, body, votes, author, created_at
            "#,
        )
        .bind(data.article_id)
        .bind(&data.author)
        .bind(&data.body)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Comment created with id {}", comment.comment_id);
        Ok(comment)
    }
}

impl Update<UpdatedCommentDTO, VotesDTO, i32> for CommentRepository {
    #[instrument(skip(self), fields(comment_id = %id))]
    async fn update(&self, id: &i32, data: &VotesDTO) -> Result<UpdatedCommentDTO, Error> {
        debug!("Updating comment votes by {}", data.inc_votes);
        let comment = sqlx::query_as::<_, UpdatedCommentDTO>(
            r#"
            UPDATE comments SET votes = votes + $1
            WHERE comment_id = $2
            RETURNING comment_id, body, votes, author, created_at
            "#,
        )
        .bind(data.inc_votes)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)?;

        info!("Comment votes now {}", comment.votes);
        Ok(comment)
    }
}

impl Delete<i32> for CommentRepository {
    #[instrument(skip(self), fields(comment_id = %id))]
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        debug!("Deleting comment");
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        info!("Comment deleted");
        Ok(())
    }
}
