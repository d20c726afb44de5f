//! Article entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    /// References `topics.slug`
    pub topic: String,
    /// References `users.username`
    pub author: String,
    pub body: String,
    // assigned by the database on insert
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
}
