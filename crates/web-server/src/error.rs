use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Engine-level outcomes (benchmark unavailable, insufficient overlap) are
/// not errors at this layer; they are returned as well-formed payloads by
/// the handlers. `AppError` covers genuine caller mistakes.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidParameter(message) => {
                tracing::warn!(error = %message, "rejected request parameter");
                (StatusCode::BAD_REQUEST, message)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
