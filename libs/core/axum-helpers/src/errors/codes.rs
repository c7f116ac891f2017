//! Numeric error codes attached to error logs.
//!
//! Clients only ever see the `{success, message}` envelope; the code is a
//! `tracing` field so failures can be grouped in log search.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body or query failed field validation
    ValidationError,
    /// Path or query id is not a valid UUID
    InvalidUuid,
    /// Request body is not valid JSON for the target type
    InvalidJson,
    /// No record for the requested id
    NotFound,
    /// Request is well-formed but rejected by a business rule
    BadRequest,
    /// No route matched the request
    RouteNotFound,

    // Server errors (5000-5999)
    /// Unexpected failure while handling the request
    InternalError,
    /// A dependency (database) is unreachable
    ServiceUnavailable,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::RouteNotFound => "ROUTE_NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidUuid => 1002,
            ErrorCode::InvalidJson => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::BadRequest => 1005,
            ErrorCode::RouteNotFound => 1006,
            ErrorCode::InternalError => 5001,
            ErrorCode::ServiceUnavailable => 5003,
        }
    }

    /// Message used when the caller has nothing more specific to say.
    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Validation failed",
            ErrorCode::InvalidUuid => "Invalid ID format",
            ErrorCode::InvalidJson => "Invalid JSON body",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::RouteNotFound => "Route not found",
            ErrorCode::InternalError => "Something went wrong!",
            ErrorCode::ServiceUnavailable => "Service unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
