//! Query DTOs - query string parameters
//!
//! Every field is kept as raw text so that malformed values reach our own
//! validation (and its messages) instead of the extractor's rejection.

use serde::{Deserialize, Serialize};

/// `GET /api/articles?sort_by=&order=&topic=&limit=&p=`
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ArticlesQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<String>,
    pub p: Option<String>,
}

/// `GET /api/articles/{article_id}/comments?limit=&p=`
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub p: Option<String>,
}
