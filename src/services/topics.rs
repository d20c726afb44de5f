//! Topic services

use super::{decode, json_body};
use crate::core::{AppError, AppState};
use crate::dtos::CreateTopicDTO;
use crate::entities::Topic;
use crate::repositories::{Create, ReadAll};
use crate::validation::{FieldRule, JsonType, check_body};
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

const TOPIC_FIELDS: [FieldRule; 3] = [
    FieldRule::required("slug", JsonType::String)
        .with_messages("Topic is required", "Invalid Topic Slug"),
    FieldRule::required("description", JsonType::String)
        .with_messages("Description is required", "Invalid Description"),
    FieldRule::required("img_url", JsonType::String)
        .with_messages("Image URL is required", "Invalid Image URL"),
];

#[instrument(skip(state))]
pub async fn list_topics(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    debug!("Listing topics");
    let topics: Vec<Topic> = state.topic.read_all().await?;
    info!("Found {} topics", topics.len());
    Ok(Json(json!({ "topics": topics })))
}

#[instrument(skip(state, body))]
pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Creating topic");
    let body = json_body(body)?;
    check_body(&body, &TOPIC_FIELDS)?;

    let new_topic: CreateTopicDTO = decode(body)?;
    new_topic.validate()?;

    let topic = state.topic.create(&new_topic).await.map_err(|e| {
        if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
            warn!(slug = %new_topic.slug, "Topic already exists");
            AppError::conflict("Topic already exists")
        } else {
            AppError::from(e)
        }
    })?;

    info!(slug = %topic.slug, "Topic created");
    Ok((StatusCode::CREATED, Json(json!({ "topic": topic }))))
}
