//! Stateless endpoints: health and ad-hoc prediction

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use cycledir_core::{CycleSettings, Prediction, predict};

use crate::routes::JsonBody;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict_handler))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Request body for an ad-hoc prediction
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    pub last_period_date: Option<String>,
    pub cycle_length: i64,
    pub period_length: i64,
}

/// POST /predict - Predict from explicit inputs. Open to anonymous callers.
///
/// Responds with `null` when the inputs cannot produce a prediction.
async fn predict_handler(JsonBody(req): JsonBody<PredictRequest>) -> Json<Option<Prediction>> {
    let settings = CycleSettings::new(req.cycle_length, req.period_length);
    let last = req.last_period_date.as_deref().unwrap_or_default();
    Json(predict(last, &settings))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::app;
    use crate::routes::test_support::{request, send, state};

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(app(state()), request("GET", "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn anonymous_prediction() {
        let body = json!({"lastPeriodDate": "2024-06-01", "cycleLength": 35, "periodLength": 7});
        let (status, body) = send(app(state()), request("POST", "/predict", None, Some(body))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "nextPeriodStart": "2024-07-06",
                "nextPeriodEnd": "2024-07-12",
                "ovulationDay": "2024-06-22",
                "fertileWindowStart": "2024-06-17",
                "fertileWindowEnd": "2024-06-23",
                "cycleLength": 35
            })
        );
    }

    #[tokio::test]
    async fn unusable_inputs_give_null() {
        for body in [
            json!({"lastPeriodDate": "", "cycleLength": 28, "periodLength": 5}),
            json!({"lastPeriodDate": "soon", "cycleLength": 28, "periodLength": 5}),
            json!({"lastPeriodDate": "2024-01-20", "cycleLength": 0, "periodLength": 5}),
            json!({"lastPeriodDate": "2024-01-20", "cycleLength": 28, "periodLength": -1}),
            json!({"cycleLength": 28, "periodLength": 5}),
            json!({"lastPeriodDate": null, "cycleLength": 28, "periodLength": 5}),
        ] {
            let (status, body) = send(app(state()), request("POST", "/predict", None, Some(body))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, Value::Null);
        }
    }

    #[tokio::test]
    async fn malformed_bodies_are_json_errors() {
        let (status, body) = send(
            app(state()),
            request("POST", "/predict", None, Some(json!({"lastPeriodDate": "2024-01-20"}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("cycleLength"));

        let (status, body) = send(app(state()), request("POST", "/predict", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
