//! API error type and its single status mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the kind→status mapping
//! lives in exactly one place (the `IntoResponse` impl below) so a new
//! endpoint cannot invent its own convention.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use inq_core::investigate::InvestigateError;
use inq_core::reports::ReportError;
use inq_protocol::ErrorBody;

/// Error kinds the API surface distinguishes.
#[derive(Debug)]
pub enum ApiError {
    /// Request was malformed (empty topic, unknown depth, bad run id).
    InvalidArgument(String),

    /// The addressed resource does not exist.
    NotFound(String),

    /// Anything that failed on the server side. The detail string is
    /// passed through to the client verbatim.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidArgument(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };
        (status, Json(ErrorBody { error: detail })).into_response()
    }
}

impl From<InvestigateError> for ApiError {
    fn from(e: InvestigateError) -> Self {
        match e {
            InvestigateError::InvalidArgument(detail) => ApiError::InvalidArgument(detail),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::NotFound(name) => ApiError::NotFound(format!("Report not found: {name}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
