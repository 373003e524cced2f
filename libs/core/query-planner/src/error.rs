use thiserror::Error;

use crate::store::StoreError;

/// Errors produced while planning or executing a paginated query.
///
/// Malformed pagination and filter input never ends up here: it is
/// replaced by defaults while the plan is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("Projection cannot mix included and hidden fields")]
    ConflictingProjectionModes,

    #[error("Cannot sort by unknown field '{0}'")]
    InvalidSortField(String),

    #[error("Cannot project unknown field '{0}'")]
    UnknownProjectionField(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PlannerError {
    /// Whether the failure was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PlannerError::StoreUnavailable(_))
    }
}

impl From<StoreError> for PlannerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => PlannerError::StoreUnavailable(msg),
        }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
