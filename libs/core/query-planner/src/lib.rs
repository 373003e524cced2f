//! Query planning and pagination over document collections.
//!
//! Turns untrusted query-string parameters into a bounded, deterministic
//! [`QueryPlan`] and runs it against a [`RecordStore`], producing a
//! [`ResultEnvelope`] with page metadata.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  RawParams   │  ← HTTP query string (skills=..&sortBy=..&limit=..)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ QueryPlanner │  ← allow-listed filters, pagination defaults,
//! └──────┬───────┘    sort/projection parsing and schema validation
//!        │
//! ┌──────▼───────┐
//! │  QueryPlan   │  ← filter + sort + projection + skip/limit
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ RecordStore  │  ← count(filter) ‖ find(plan), run concurrently
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use query_planner::{
//!     FilterField, MemoryRecordStore, PaginationConfig, QueryPlanner, QuerySchema, RawParams,
//! };
//!
//! struct Profiles;
//!
//! impl QuerySchema for Profiles {
//!     fn filter_fields() -> &'static [FilterField] {
//!         const FIELDS: &[FilterField] = &[FilterField::exact("email"), FilterField::element("skills")];
//!         FIELDS
//!     }
//!
//!     fn available_fields() -> &'static [&'static str] {
//!         &["id", "email", "skills"]
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = QueryPlanner::<Profiles>::new(PaginationConfig::default());
//! let store = MemoryRecordStore::default();
//!
//! let mut raw = RawParams::new();
//! raw.insert("skills".into(), "UX Designer".into());
//! raw.insert("limit".into(), "5".into());
//!
//! let envelope = planner.paginate(&raw, &store).await?;
//! assert_eq!(envelope.limit, 5);
//! # Ok(())
//! # }
//! ```

pub mod envelope;
pub mod error;
pub mod filter;
pub mod memory;
pub mod pagination;
pub mod planner;
pub mod projection;
pub mod schema;
pub mod sort;
pub mod store;

mod tokens;

pub use envelope::ResultEnvelope;
pub use error::{PlannerError, PlannerResult};
pub use filter::{FilterClause, FilterSpec};
pub use memory::MemoryRecordStore;
pub use pagination::{
    DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MAX_SKIP, PaginationConfig, PaginationSpec,
};
pub use planner::{
    LIMIT_PARAM, PAGE_PARAM, PROJECT_BY_PARAM, QueryPlanner, RawParams, SORT_BY_PARAM,
};
pub use projection::{ProjectionField, ProjectionMode, ProjectionSpec};
pub use schema::{FilterField, MatchStrategy, QuerySchema};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use store::{QueryPlan, Record, RecordStore, StoreError};
