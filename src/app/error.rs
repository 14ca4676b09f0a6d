use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::Error as SqlxError;

/// Application error type for unified error handling across the app.
#[derive(Debug)]
pub enum AppError {
    /// Validation errors (400 Bad Request) - invalid input data
    Validation(String),

    /// Missing resource (404 Not Found)
    NotFound(String),

    /// Unsupported HTTP verb on a known route (405 Method Not Allowed)
    MethodNotAllowed,

    /// Document store errors (500 Internal Server Error). The message is what the
    /// caller sees; the source error is only logged.
    Database {
        message: &'static str,
        source: SqlxError,
    },
}

impl AppError {
    /// Wrap a document store error with the generic message for the failing operation.
    pub fn database(message: &'static str) -> impl FnOnce(SqlxError) -> AppError {
        move |source| AppError::Database { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::Database { message, source } => {
                tracing::error!(err = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
