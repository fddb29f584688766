use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::api::rest::dto::ErrorResponse;
use crate::domain::error::DomainError;

/// Error returned by REST handlers; rendered as `{"messages": [...]}`.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// The request could not be decoded (bad JSON, bad query string).
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// Map domain error to its status code and client-facing body
pub fn map_domain_error(e: &DomainError) -> (StatusCode, ErrorResponse) {
    let status = match e {
        DomainError::Validation { .. } | DomainError::Business { .. } => StatusCode::BAD_REQUEST,
        DomainError::Technical { message, cause } => {
            // Log the internal error details but don't expose them to the client
            error!(cause = %cause, "{message}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        ErrorResponse {
            messages: e.messages(),
        },
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Domain(e) => map_domain_error(e),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    messages: vec![message.clone()],
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
