//! ArticleRepository - articles with their derived comment count

use super::{Create, Delete, Read, Update};
use crate::dtos::{ArticleDTO, ArticleListDTO, CreateArticleDTO, VotesDTO};
use crate::entities::Article;
use crate::query::{ARTICLE_BY_ID_SQL, ArticleListParams, ArticlePageRow, collect_articles, list_articles};
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};

pub struct ArticleRepository {
    connection_pool: PgPool,
}

impl ArticleRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// One page of articles plus the number of articles matching the filter.
    /// Parameters are expected to be validated already.
    #[instrument(skip(self, params), fields(sort_by = ?params.sort_by, order = ?params.order, topic = ?params.topic))]
    pub async fn list(&self, params: &ArticleListParams) -> Result<ArticleListDTO, Error> {
        debug!("Listing articles");
        let mut query_builder = list_articles(params);
        let rows = query_builder
            .build_query_as::<ArticlePageRow>()
            .fetch_all(&self.connection_pool)
            .await?;

        let (articles, total_count) = collect_articles(rows);
        debug!("Returning {} of {} articles", articles.len(), total_count);

        Ok(ArticleListDTO {
            articles,
            total_count,
        })
    }
}

impl Read<ArticleDTO, i32> for ArticleRepository {
    #[instrument(skip(self), fields(article_id = %id))]
    async fn read(&self, id: &i32) -> Result<Option<ArticleDTO>, Error> {
        debug!("Reading article by id");
        let article = sqlx::query_as::<_, ArticleDTO>(ARTICLE_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        if article.is_some() {
            debug!("Article found");
        } else {
            debug!("Article not found");
        }

        Ok(article)
    }
}

impl Create<Article, CreateArticleDTO> for ArticleRepository {
    #[instrument(skip(self, data), fields(author = %data.author, topic = %data.topic))]
    async fn create(&self, data: &CreateArticleDTO) -> Result<Article, Error> {
        debug!("Creating new article");
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, topic, author, body, article_img_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url
            "#,
        )
        .bind(&data.title)
        .bind(&data.topic)
        .bind(&data.author)
        .bind(&data.body)
        .bind(data.img_url_or_default())
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Article created with id {}", article.article_id);
        Ok(article)
    }
}

impl Update<Article, VotesDTO, i32> for ArticleRepository {
    /// Relative increment in a single statement
    #[instrument(skip(self), fields(article_id = %id))]
    async fn update(&self, id: &i32, data: &VotesDTO) -> Result<Article, Error> {
        debug!("Updating article votes by {}", data.inc_votes);
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles SET votes = votes + $1
            WHERE article_id = $2
            RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url
            "#,
        )
        .bind(data.inc_votes)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)?;

        info!("Article votes now {}", article.votes);
        Ok(article)
    }
}

impl Delete<i32> for ArticleRepository {
    /// Removes the article's comments and then the article, atomically
    #[instrument(skip(self), fields(article_id = %id))]
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        debug!("Deleting article and its comments");
        let mut tx = self.connection_pool.begin().await?;

        let comments = sqlx::query("DELETE FROM comments WHERE article_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let articles = sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if articles.rows_affected() == 0 {
            // dropping the transaction rolls it back
            return Err(Error::RowNotFound);
        }

        tx.commit().await?;
        info!(
            "Article deleted together with {} comments",
            comments.rows_affected()
        );
        Ok(())
    }
}
