use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use query_planner::PlannerError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Query(#[from] PlannerError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("User with email '{}' already exists", email))
            }
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::Query(err) => match err {
                PlannerError::StoreUnavailable(msg) => AppError::DatabaseUnavailable(msg),
                PlannerError::ConflictingProjectionModes => AppError::InvalidQuery {
                    code: ErrorCode::ConflictingProjection,
                    message: err.to_string(),
                },
                PlannerError::InvalidSortField(_) => AppError::InvalidQuery {
                    code: ErrorCode::InvalidSortField,
                    message: err.to_string(),
                },
                PlannerError::UnknownProjectionField(_) => AppError::InvalidQuery {
                    code: ErrorCode::UnknownProjectionField,
                    message: err.to_string(),
                },
            },
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::DatabaseUnavailable(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound(Uuid::now_v7()), StatusCode::NOT_FOUND),
            (
                UserError::DuplicateEmail("ann@example.com".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                UserError::PasswordHash("bad salt".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::Database("connection reset".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_planner_errors_keep_their_codes() {
        let err: AppError = UserError::from(PlannerError::InvalidSortField("salary".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), ErrorCode::InvalidSortField);

        let err: AppError = UserError::from(PlannerError::ConflictingProjectionModes).into();
        assert_eq!(err.error_code(), ErrorCode::ConflictingProjection);

        let err: AppError =
            UserError::from(PlannerError::UnknownProjectionField("salary".into())).into();
        assert_eq!(err.error_code(), ErrorCode::UnknownProjectionField);

        let err: AppError = UserError::from(PlannerError::StoreUnavailable("down".into())).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), ErrorCode::DatabaseUnavailable);
    }
}
