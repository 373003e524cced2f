//! Storage boundary used by the planner.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::filter::FilterSpec;
use crate::projection::ProjectionSpec;
use crate::sort::SortSpec;

/// A stored document, as returned to callers
pub type Record = Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
}

/// A fully normalized query, ready to hand to a [`RecordStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub projection: ProjectionSpec,
    pub skip: u64,
    pub limit: u64,
}

/// Data access interface for paginated reads.
///
/// `count` ignores sort, projection and pagination. `find` applies all of
/// them: filter, then sort, then skip/limit, then projection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Count records matching a filter
    async fn count(&self, filter: &FilterSpec) -> Result<u64, StoreError>;

    /// Fetch one page of records
    async fn find(&self, plan: &QueryPlan) -> Result<Vec<Record>, StoreError>;
}
