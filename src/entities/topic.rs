//! Topic entity

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Topic {
    /// Unique short identifier, primary key
    pub slug: String,
    pub description: String,
    pub img_url: String,
}
