//! Response types for the PayTrack HTTP API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a response from a status and error body.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 response for an unreadable request body.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// A 401 response for a request with no recognizable actor.
    pub fn unauthorized(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiError::new(code, message))
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match &error {
            EngineError::AlreadyOpen { .. } => (StatusCode::CONFLICT, "SESSION_ALREADY_OPEN"),
            EngineError::NoOpenSession { .. } => (StatusCode::CONFLICT, "NO_OPEN_SESSION"),
            EngineError::OpenSession { .. } => (StatusCode::CONFLICT, "SESSION_STILL_OPEN"),
            EngineError::AlreadyFinalized { .. } => (StatusCode::CONFLICT, "ALREADY_FINALIZED"),
            EngineError::EmployeeAlreadyExists { .. } => {
                (StatusCode::CONFLICT, "EMPLOYEE_ALREADY_EXISTS")
            }
            EngineError::NoSessions { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "NO_SESSIONS"),
            EngineError::InvalidRate { .. } => (StatusCode::BAD_REQUEST, "INVALID_RATE"),
            EngineError::InvalidEmployee { .. } => (StatusCode::BAD_REQUEST, "INVALID_EMPLOYEE"),
            EngineError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            EngineError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            EngineError::StoreUnavailable { .. } => {
                return ApiErrorResponse::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiError::with_details(
                        "STORE_UNAVAILABLE",
                        "Record store unavailable",
                        error.to_string(),
                    ),
                );
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigReadError { .. }
            | EngineError::ConfigParseError { .. } => {
                return ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", error.to_string()),
                );
            }
        };

        ApiErrorResponse::new(status, ApiError::new(code, error.to_string()))
    }
}
