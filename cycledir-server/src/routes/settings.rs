//! Settings endpoints

use axum::{Json, Router, extract::State, routing::get};

use cycledir_core::CycleSettings;

use crate::identity::CurrentIdentity;
use crate::routes::{AppError, JsonBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(put_settings))
}

/// GET /settings - Current settings (defaults until saved)
async fn get_settings(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<CycleSettings>, AppError> {
    Ok(Json(state.tracker().settings(&identity)?))
}

/// PUT /settings - Replace settings
async fn put_settings(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    JsonBody(settings): JsonBody<CycleSettings>,
) -> Result<Json<CycleSettings>, AppError> {
    Ok(Json(state.tracker().update_settings(&identity, settings)?))
}
