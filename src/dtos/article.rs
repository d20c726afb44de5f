//! Article DTOs

use crate::entities::Article;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Image used when an article is created without `article_img_url`
pub const DEFAULT_ARTICLE_IMG_URL: &str = "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2";

/// Full article plus the number of comments referencing it
#[derive(Serialize, Debug, Clone, sqlx::FromRow)]
pub struct ArticleDTO {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub article: Article,
    pub comment_count: i32,
}

impl From<Article> for ArticleDTO {
    /// A freshly inserted article has no comments yet
    fn from(article: Article) -> Self {
        Self {
            article,
            comment_count: 0,
        }
    }
}

/// Article as shown in listings (no body)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleSummaryDTO {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

/// One page of articles together with the number of matching articles
#[derive(Serialize, Debug)]
pub struct ArticleListDTO {
    pub articles: Vec<ArticleSummaryDTO>,
    pub total_count: i64,
}

/// DTO for creating a new article (without article_id, created_at, votes).
/// Length limits follow the column sizes of the `articles` table.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateArticleDTO {
    #[validate(length(max = 250, message = "Author must be at most 250 characters"))]
    pub author: String,

    #[validate(length(max = 1000, message = "Title must be at most 1000 characters"))]
    pub title: String,

    pub body: String,

    #[validate(length(max = 1000, message = "Topic must be at most 1000 characters"))]
    pub topic: String,

    #[validate(length(max = 1000, message = "Image URL must be at most 1000 characters"))]
    pub article_img_url: Option<String>,
}

impl CreateArticleDTO {
    /// Image URL to store: the supplied one, or the default when absent or empty
    pub fn img_url_or_default(&self) -> &str {
        match self.article_img_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_ARTICLE_IMG_URL,
        }
    }
}
