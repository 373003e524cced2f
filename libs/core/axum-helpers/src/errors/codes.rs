//! Error codes shared by every error response.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidSortField;
//! assert_eq!(code.as_str(), "INVALID_SORT_FIELD");
//! assert_eq!(code.code(), 6001);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    NotFound,
    Conflict,
    BadRequest,
    QueryExtraction,

    // Server errors
    InternalError,
    ServiceUnavailable,

    // Database errors (2000-2999)
    DatabaseUnavailable,

    // Query planning errors (6000-6999)
    InvalidSortField,
    UnknownProjectionField,
    ConflictingProjection,
}

impl ErrorCode {
    /// Identifier clients can match on
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::QueryExtraction => "QUERY_EXTRACTION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::InvalidSortField => "INVALID_SORT_FIELD",
            Self::UnknownProjectionField => "UNKNOWN_PROJECTION_FIELD",
            Self::ConflictingProjection => "CONFLICTING_PROJECTION",
        }
    }

    /// Integer code used in logs and metrics.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: database errors
    /// - 6000-6999: query planning errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::ServiceUnavailable => 1011,
            Self::BadRequest => 1012,
            Self::QueryExtraction => 1013,

            Self::DatabaseUnavailable => 2001,

            Self::InvalidSortField => 6001,
            Self::UnknownProjectionField => 6002,
            Self::ConflictingProjection => 6003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::QueryExtraction => "Failed to parse query string",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseUnavailable => "Database is unavailable",
            Self::InvalidSortField => "Sort field is not allowed",
            Self::UnknownProjectionField => "Projection field is not allowed",
            Self::ConflictingProjection => "Projection cannot mix shown and hidden fields",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
