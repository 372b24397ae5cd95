//! # HTTP Errors
//!
//! Maps search failures onto status codes and a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::search::SearchError;

/// Result type for HTTP handlers
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP layer errors
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Query parameter that does not parse
    #[error("Invalid query parameter {name}: {value}")]
    InvalidQueryParam { name: &'static str, value: String },

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl HttpError {
    /// 400 for bad requests, 503 for transient store failures, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::InvalidQueryParam { .. } => StatusCode::BAD_REQUEST,
            HttpError::Search(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            HttpError::Search(err) if err.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HttpError::InvalidQueryParam { .. } => "ROSTER_INVALID_QUERY_PARAM",
            HttpError::Search(err) => err.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl From<&HttpError> for ErrorResponse {
    fn from(err: &HttpError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
            status: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
