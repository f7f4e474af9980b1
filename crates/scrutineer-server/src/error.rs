//! Error types for the HTTP layer.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scrutineer_core::OrchestratorError;
use serde::Serialize;
use thiserror::Error;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a request can fail with.
///
/// A malformed payload is the caller's fault (400); a validation run that
/// misses its deadline is the service's (500). Validator outcomes are never
/// errors at this layer, they ride inside the 200 summary.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request body could not be decoded as a candidate batch.
    #[error("unable to interpret payload")]
    MalformedPayload(#[from] JsonRejection),

    /// The validation run faulted.
    #[error(transparent)]
    Validation(#[from] OrchestratorError),
}

impl ServerError {
    /// The HTTP status code this error responds with.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let Self::MalformedPayload(rejection) = &self {
            // Decode details stay in the log; the response body is generic.
            tracing::debug!(detail = %rejection.body_text(), "rejected validation payload");
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
