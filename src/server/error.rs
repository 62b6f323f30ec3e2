use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::core::CompareError;

/// Errors returned to HTTP clients as plain text.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

impl From<CompareError> for AppError {
    fn from(e: CompareError) -> Self {
        Self::BadRequest(e.to_string())
    }
}
