//! Article services

use super::{ARTICLE_NOT_FOUND, INVALID_ARTICLE_ID, decode, json_body, json_body_or_empty};
use crate::core::{AppError, AppState};
use crate::dtos::{ArticleDTO, ArticleListDTO, ArticlesQuery, CreateArticleDTO};
use crate::query::ArticleListParams;
use crate::repositories::{Create, Delete, Lookup, Read, Update};
use crate::validation::{FieldRule, JsonType, check_body, parse_id, parse_inc_votes};
use axum::{
    body::Bytes,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use futures::try_join;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

const ARTICLE_FIELDS: [FieldRule; 5] = [
    FieldRule::required("author", JsonType::String),
    FieldRule::required("title", JsonType::String),
    FieldRule::required("body", JsonType::String),
    FieldRule::required("topic", JsonType::String),
    FieldRule::optional("article_img_url", JsonType::String)
        .with_invalid_message("Invalid Image URL"),
];

/// `GET /api/articles` - every parameter is validated before the topic
/// lookup, and the topic lookup before the listing.
#[instrument(skip(state, query))]
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ArticlesQuery>, QueryRejection>,
) -> Result<Json<ArticleListDTO>, AppError> {
    let Query(query) = query?;
    let params = ArticleListParams::try_from(query)?;
    debug!(?params, "Listing articles");

    if let Some(topic) = params.topic.as_deref() {
        state.exists.check(Lookup::Topic(topic)).await?;
    }

    let page = state.article.list(&params).await?;
    info!(
        "Returning {} articles of {}",
        page.articles.len(),
        page.total_count
    );
    Ok(Json(page))
}

#[instrument(skip(state), fields(article_id = %article_id))]
pub async fn get_article_by_id(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Fetching article");
    let article_id = parse_id(&article_id, INVALID_ARTICLE_ID)?;

    let article: ArticleDTO = state.article.read(&article_id).await?.ok_or_else(|| {
        warn!("Article not found");
        AppError::not_found(ARTICLE_NOT_FOUND)
    })?;

    Ok(Json(json!({ "article": article })))
}

#[instrument(skip(state, body))]
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Creating article");
    let body = json_body(body)?;
    check_body(&body, &ARTICLE_FIELDS)?;

    let new_article: CreateArticleDTO = decode(body)?;
    new_article.validate()?;

    // author and topic lookups run concurrently
    try_join!(
        async {
            state
                .exists
                .check(Lookup::User(&new_article.author))
                .await
                .map_err(|e| e.or_not_found("Author Not Found"))
        },
        async {
            state
                .exists
                .check(Lookup::Topic(&new_article.topic))
                .await
                .map_err(|e| e.or_not_found("Topic Not Found"))
        },
    )?;

    let article = state.article.create(&new_article).await?;
    info!(article_id = article.article_id, "Article created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "article": ArticleDTO::from(article) })),
    ))
}

#[instrument(skip(state, body), fields(article_id = %article_id))]
pub async fn update_article_votes(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    debug!("Updating article votes");
    let article_id = parse_id(&article_id, INVALID_ARTICLE_ID)?;
    let votes = parse_inc_votes(&json_body_or_empty(&body)?)?;

    state
        .exists
        .check(Lookup::Article(article_id))
        .await
        .map_err(|e| e.or_not_found(ARTICLE_NOT_FOUND))?;

    let article = state
        .article
        .update(&article_id, &votes)
        .await
        .map_err(|e| AppError::from(e).or_not_found(ARTICLE_NOT_FOUND))?;

    info!(votes = article.votes, "Article votes updated");
    Ok(Json(json!({ "article": article })))
}

#[instrument(skip(state), fields(article_id = %article_id))]
pub async fn delete_article_by_id(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Deleting article");
    let article_id = parse_id(&article_id, INVALID_ARTICLE_ID)?;

    state
        .exists
        .check(Lookup::Article(article_id))
        .await
        .map_err(|e| e.or_not_found(ARTICLE_NOT_FOUND))?;

    state
        .article
        .delete(&article_id)
        .await
        .map_err(|e| AppError::from(e).or_not_found(ARTICLE_NOT_FOUND))?;

    info!("Article deleted");
    Ok(StatusCode::NO_CONTENT)
}
