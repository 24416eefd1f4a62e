pub mod events;
pub mod periods;
pub mod predict;
pub mod prediction;
pub mod settings;

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use cycledir_core::CycleError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON request body whose rejections answer with an `ErrorResponse`
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Convert errors to HTTP responses, using the status that fits a `CycleError`
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if self.0.is::<JsonRejection>() {
            return StatusCode::BAD_REQUEST;
        }
        match self.0.downcast_ref::<CycleError>() {
            Some(CycleError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            Some(
                CycleError::InvalidDate(_)
                | CycleError::InvalidSettings(_)
                | CycleError::InvalidUserId(_),
            ) => StatusCode::BAD_REQUEST,
            Some(CycleError::RecordNotFound(_)) => StatusCode::NOT_FOUND,
            Some(CycleError::DuplicateRecord(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_cycle_errors_to_statuses() {
        let status = |e: CycleError| AppError::from(e).status();

        assert_eq!(status(CycleError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(status(CycleError::InvalidDate("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(CycleError::InvalidSettings("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(CycleError::InvalidUserId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(CycleError::RecordNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(CycleError::DuplicateRecord("x".into())), StatusCode::CONFLICT);
        assert_eq!(status(CycleError::Config("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn other_errors_are_internal() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
