use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced at the HTTP boundary
///
/// The recommendation engine itself cannot fail; only request decoding can.
/// Decoding failures keep the status axum chose for them: 400 for malformed
/// JSON, 415 for a missing content type, 422 for a body of the wrong shape.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {message}")]
    InvalidInput { status: StatusCode, message: String },
}

impl AppError {
    /// Invalid input reported as `400 Bad Request`
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput { status, message } => (status, message),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
