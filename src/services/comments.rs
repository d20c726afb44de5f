//! Comment services

use super::{ARTICLE_NOT_FOUND, COMMENT_NOT_FOUND, INVALID_ARTICLE_ID, INVALID_COMMENT_ID, decode, json_body, json_body_or_empty};
use crate::core::{AppError, AppState};
use crate::dtos::{CommentListDTO, CreateCommentDTO, CreateCommentRequestDTO, PaginationQuery};
use crate::query::Pagination;
use crate::repositories::{Create, Delete, Lookup, Update};
use crate::validation::{FieldRule, JsonType, check_body, parse_id, parse_inc_votes};
use axum::{
    body::Bytes,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

const COMMENT_FIELDS: [FieldRule; 2] = [
    FieldRule::required("username", JsonType::String),
    FieldRule::required("body", JsonType::String),
];

#[instrument(skip(state, query), fields(article_id = %article_id))]
pub async fn list_comments_for_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<CommentListDTO>, AppError> {
    debug!("Listing comments");
    let Query(query) = query?;
    let pagination = Pagination::try_from(query)?;
    let article_id = parse_id(&article_id, INVALID_ARTICLE_ID)?;

    state
        .exists
        .check(Lookup::Article(article_id))
        .await
        .map_err(|e| e.or_not_found(ARTICLE_NOT_FOUND))?;

    let page = state
        .comment
        .list_for_article(article_id, pagination)
        .await?;
    info!(
        "Returning {} comments of {}",
        page.comments.len(),
        page.total_count
    );
    Ok(Json(page))
}

/// The body is checked before the article, and the article before the author
#[instrument(skip(state, body), fields(article_id = %article_id))]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Creating comment");
    let article_id = parse_id(&article_id, INVALID_ARTICLE_ID)?;
    let body = json_body(body)?;
    check_body(&body, &COMMENT_FIELDS)?;

    let request: CreateCommentRequestDTO = decode(body)?;
    request.validate()?;

    state
        .exists
        .check(Lookup::Article(article_id))
        .await
        .map_err(|e| e.or_not_found(ARTICLE_NOT_FOUND))?;
    state
        .exists
        .check(Lookup::User(&request.username))
        .await
        .map_err(|e| e.or_not_found("Username Not Found"))?;

    let comment = state
        .comment
        .create(&CreateCommentDTO::new(article_id, request))
        .await?;

    info!(comment_id = comment.comment_id, "Comment created");
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

#[instrument(skip(state, body), fields(comment_id = %comment_id))]
pub async fn update_comment_votes(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    debug!("Updating comment votes");
    let comment_id = parse_id(&comment_id, INVALID_COMMENT_ID)?;
    let votes = parse_inc_votes(&json_body_or_empty(&body)?)?;

    state
        .exists
        .check(Lookup::Comment(comment_id))
        .await
        .map_err(|e| e.or_not_found(COMMENT_NOT_FOUND))?;

    let comment = state
        .comment
        .update(&comment_id, &votes)
        .await
        .map_err(|e| AppError::from(e).or_not_found(COMMENT_NOT_FOUND))?;

    info!(votes = comment.votes, "Comment votes updated");
    Ok(Json(json!({ "comment": comment })))
}

#[instrument(skip(state), fields(comment_id = %comment_id))]
pub async fn delete_comment_by_id(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Deleting comment");
    let comment_id = parse_id(&comment_id, INVALID_COMMENT_ID)?;

    state
        .exists
        .check(Lookup::Comment(comment_id))
        .await
        .map_err(|e| e.or_not_found(COMMENT_NOT_FOUND))?;

    state
        .comment
        .delete(&comment_id)
        .await
        .map_err(|e| AppError::from(e).or_not_found(COMMENT_NOT_FOUND))?;

    info!("Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
