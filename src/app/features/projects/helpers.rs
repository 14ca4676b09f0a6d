use axum::{
    handler::Handler,
    http::StatusCode,
    routing::{post, MethodRouter},
    Json,
};
use serde::Serialize;

use crate::app::{error::AppError, AppState};

/// Body returned by mutating endpoints on success.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// OPTIONS without CORS request headers. Real preflights are answered by the CORS layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any verb other than POST/OPTIONS on a mutating endpoint.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// POST-only endpoint: answers OPTIONS with 200 and every other verb with a JSON 405.
pub fn post_endpoint<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler).options(preflight).fallback(method_not_allowed)
}
