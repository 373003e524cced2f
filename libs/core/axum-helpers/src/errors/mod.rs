pub mod codes;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 6001,
///   "error": "INVALID_SORT_FIELD",
///   "message": "Cannot sort by unknown field 'salary'"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable identifier
    pub error: String,
    pub message: String,
    /// Structured details, e.g. per-field validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Rejected query parameters; `code` selects the 6xxx identifier
    #[error("Invalid query: {message}")]
    InvalidQuery { code: ErrorCode, message: String },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::QueryExtractorRejection(e) => e.status(),
            AppError::ValidationError(_)
            | AppError::InvalidUuid(_)
            | AppError::BadRequest(_)
            | AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseUnavailable(_) | AppError::ServiceUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::QueryExtractorRejection(_) => ErrorCode::QueryExtraction,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::InvalidQuery { code, .. } => *code,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::DatabaseUnavailable(_) => ErrorCode::DatabaseUnavailable,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }

    fn into_error_response(self) -> ErrorResponse {
        let code = self.error_code();
        match self {
            AppError::JsonExtractorRejection(e) => ErrorResponse::new(code, e.body_text()),
            AppError::QueryExtractorRejection(e) => ErrorResponse::new(code, e.body_text()),
            AppError::ValidationError(e) => {
                ErrorResponse::new(code, code.default_message()).with_details(validation_details(&e))
            }
            AppError::InvalidUuid(raw) => {
                ErrorResponse::new(code, format!("{}: {}", code.default_message(), raw))
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InvalidQuery { message: msg, .. } => ErrorResponse::new(code, msg),
            // Server-side details stay in the logs
            AppError::DatabaseUnavailable(_)
            | AppError::InternalServerError(_)
            | AppError::ServiceUnavailable(_) => ErrorResponse::new(code, code.default_message()),
        }
    }
}

/// `{ field: [{ code, message, params }] }` for each failed field
fn validation_details(errors: &ValidationErrors) -> Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    Value::Object(details)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        (status, Json(self.into_error_response())).into_response()
    }
}

/// Fallback handler for unmatched routes
pub async fn not_found() -> Response {
    let body = ErrorResponse::new(
        ErrorCode::NotFound,
        "The requested resource was not found",
    );
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
