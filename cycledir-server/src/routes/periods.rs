//! Period record endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::Deserialize;

use cycledir_core::PeriodRecord;

use crate::identity::CurrentIdentity;
use crate::routes::{AppError, JsonBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/periods", get(list_periods).post(create_period))
        .route("/periods/{date}", delete(delete_period))
}

/// GET /periods - Recorded period starts, most recent first
async fn list_periods(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<Vec<PeriodRecord>>, AppError> {
    Ok(Json(state.tracker().records(&identity)?))
}

/// Request body for recording a period start
#[derive(Deserialize)]
pub struct CreatePeriodRequest {
    pub date: String,
}

/// POST /periods - Record a period start
async fn create_period(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    JsonBody(req): JsonBody<CreatePeriodRequest>,
) -> Result<(StatusCode, Json<PeriodRecord>), AppError> {
    let record = state.tracker().log_period(&identity, &req.date)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /periods/:date - Remove a recorded period start
async fn delete_period(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    state.tracker().remove_period(&identity, &date)?;
    Ok(StatusCode::NO_CONTENT)
}
