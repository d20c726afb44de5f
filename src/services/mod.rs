//! Services module - HTTP handlers, one sub-module per resource
//!
//! Handlers extract path, query and body, run the checks in the documented
//! order and delegate to the repositories. Every failure is an `AppError`.

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

pub use articles::{
    create_article, delete_article_by_id, get_article_by_id, list_articles, update_article_votes,
};
pub use comments::{
    create_comment, delete_comment_by_id, list_comments_for_article, update_comment_votes,
};
pub use topics::{create_topic, list_topics};
pub use users::{get_user_by_username, list_users};

use crate::core::AppError;
use axum::{
    body::Bytes,
    extract::{Json, rejection::JsonRejection},
    http::Uri,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

/// Documentation of every endpoint, served by `GET /api`
const ENDPOINTS: &str = include_str!("../../endpoints.json");

pub const ARTICLE_NOT_FOUND: &str =
    "Oops! That article could not be found. It might have been deleted or never existed";
pub const COMMENT_NOT_FOUND: &str =
    "Oops! That comment could not be found. It might have been deleted or never existed";
pub const INVALID_ARTICLE_ID: &str = "Invalid Article ID";
pub const INVALID_COMMENT_ID: &str = "Invalid Comment ID";

#[instrument]
pub async fn get_endpoints() -> Result<Json<Value>, AppError> {
    debug!("Serving endpoint documentation");
    let endpoints: Value = serde_json::from_str(ENDPOINTS)
        .map_err(|e| AppError::internal_server_error().with_details(e.to_string()))?;
    Ok(Json(json!({ "endpoints": endpoints })))
}

/// Fallback for unknown paths and unsupported methods
pub async fn not_found(uri: Uri) -> AppError {
    warn!(%uri, "No route matched");
    AppError::not_found("Not Found")
}

/// Unwraps the raw JSON body, turning a malformed one into 400 "Bad Request"
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    let Json(value) = body?;
    Ok(value)
}

/// Reads a body that may be absent: no bytes (or only whitespace) is `{}`,
/// anything else must be valid JSON.
pub(crate) fn json_body_or_empty(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request("Bad Request").with_details(e.to_string()))
}

/// Deserializes a body whose shape has already been checked
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::bad_request("Bad Request").with_details(e.to_string()))
}
