//! User services - users are read-only through the API

use crate::core::{AppError, AppState};
use crate::repositories::{Read, ReadAll};
use crate::validation::looks_numeric;
use axum::extract::{Json, Path, State};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    debug!("Listing users");
    let users = state.user.read_all().await?;
    info!("Found {} users", users.len());
    Ok(Json(json!({ "users": users })))
}

#[instrument(skip(state), fields(username = %username))]
pub async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Fetching user by username");
    if looks_numeric(&username) {
        warn!("Rejected numeric username");
        return Err(AppError::bad_request("Invalid Username"));
    }

    let user = state.user.read(&username).await?.ok_or_else(|| {
        warn!("User not found");
        AppError::not_found("User Not Found")
    })?;

    Ok(Json(json!({ "user": user })))
}
