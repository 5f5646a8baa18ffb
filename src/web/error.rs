//! API error handling for the Code Museum server.
//!
//! Every failure is answered with a flat JSON object:
//! `{"error": "<message>", "code": "<CODE>"}` plus an optional `details` map
//! for field validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::MuseumError;

/// Message used for every unexpected failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400): malformed body or missing fields.
    BadRequest,
    /// Unauthorized (401): missing or unknown acting user, bad credentials.
    Unauthorized,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Error code.
    pub code: ErrorCode,
    /// Field-level validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create an internal server error. The message is never exposed.
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, SERVER_ERROR_MESSAGE)
    }

    /// Error code of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a 400 error from validator::ValidationErrors.
    ///
    /// The top-level message is the first field message in field-name order,
    /// so each request type controls what a client sees.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        let message = details
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());

        Self {
            code: ErrorCode::BadRequest,
            message,
            details: Some(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            code: self.code,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<MuseumError> for ApiError {
    fn from(err: MuseumError) -> Self {
        match err {
            MuseumError::Validation(msg) => ApiError::bad_request(msg),
            MuseumError::Auth(msg) => ApiError::unauthorized(msg),
            err => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_museum_error() {
        let err = ApiError::from(MuseumError::Validation("Missing required fields".into()));
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Missing required fields");

        let err = ApiError::from(MuseumError::Auth("Invalid user".into()));
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid user");
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = ApiError::from(MuseumError::Database("disk I/O error".into()));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), SERVER_ERROR_MESSAGE);

        // Missing records have no dedicated status.
        let err = ApiError::from(MuseumError::NotFound("Snippet".into()));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_flat_body_shape() {
        let body = ErrorBody {
            error: "Invalid credentials".to_string(),
            code: ErrorCode::Unauthorized,
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Invalid credentials", "code": "UNAUTHORIZED"})
        );
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name required"))]
        name: String,
        #[validate(length(min = 1, message = "Age required"))]
        age: String,
    }

    #[test]
    fn test_validation_errors_message_and_details() {
        let sample = Sample {
            name: String::new(),
            age: String::new(),
        };
        let err = ApiError::from_validation_errors(sample.validate().unwrap_err());
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Age required");
        let details = err.details.unwrap();
        assert_eq!(details["name"], vec!["Name required".to_string()]);
    }
}
