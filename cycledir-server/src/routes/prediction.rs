//! Prediction and overview endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use cycledir_core::{CycleError, Overview, Prediction, parse_calendar_date};

use crate::identity::CurrentIdentity;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prediction", get(get_prediction))
        .route("/overview", get(get_overview))
}

/// GET /prediction - Prediction from the latest record, `null` before the first one
async fn get_prediction(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<Option<Prediction>>, AppError> {
    Ok(Json(state.tracker().prediction(&identity)?))
}

#[derive(Deserialize)]
pub struct OverviewQuery {
    /// The caller's local date; defaults to the server's.
    pub today: Option<String>,
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, CycleError> {
    match today {
        Some(s) => parse_calendar_date(s).ok_or_else(|| CycleError::InvalidDate(s.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

/// GET /overview - Settings, records, prediction and countdown
async fn get_overview(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<Overview>, AppError> {
    let today = resolve_today(query.today.as_deref())?;
    Ok(Json(state.tracker().overview(&identity, today)?))
}
