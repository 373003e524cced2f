//! Builds query plans from raw request parameters and executes them.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use tracing::instrument;

use crate::envelope::ResultEnvelope;
use crate::error::{PlannerError, PlannerResult};
use crate::filter::{FilterClause, FilterSpec};
use crate::pagination::{DEFAULT_PAGE, PaginationConfig, PaginationSpec, parse_positive};
use crate::projection::{ProjectionMode, ProjectionSpec};
use crate::schema::QuerySchema;
use crate::sort::{SortKey, SortSpec};
use crate::store::{QueryPlan, RecordStore};

pub const SORT_BY_PARAM: &str = "sortBy";
pub const PROJECT_BY_PARAM: &str = "projectBy";
pub const LIMIT_PARAM: &str = "limit";
pub const PAGE_PARAM: &str = "page";

/// Query-string parameters exactly as received
pub type RawParams = HashMap<String, String>;

/// Plans and runs paginated queries for one [`QuerySchema`].
///
/// The planner holds no per-request state; one instance is shared by all
/// requests.
pub struct QueryPlanner<S> {
    config: PaginationConfig,
    _schema: PhantomData<fn() -> S>,
}

impl<S> Clone for QueryPlanner<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            _schema: PhantomData,
        }
    }
}

impl<S> fmt::Debug for QueryPlanner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryPlanner")
            .field("schema", &std::any::type_name::<S>())
            .field("config", &self.config)
            .finish()
    }
}

impl<S> Default for QueryPlanner<S> {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

impl<S> QueryPlanner<S> {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            _schema: PhantomData,
        }
    }

    pub fn config(&self) -> PaginationConfig {
        self.config
    }
}

impl<S: QuerySchema> QueryPlanner<S> {
    /// Keep only allow-listed, non-empty filter parameters.
    ///
    /// Clauses follow the schema's declaration order.
    pub fn build_filter(&self, raw: &RawParams) -> FilterSpec {
        S::filter_fields()
            .iter()
            .filter_map(|field| {
                let value = raw.get(field.name)?.trim();
                (!value.is_empty()).then(|| FilterClause::new(field.name, field.strategy, value))
            })
            .fold(FilterSpec::new(), FilterSpec::with_clause)
    }

    /// Read `limit` and `page`, falling back to defaults for anything that
    /// is not a positive integer. `limit` is capped at the configured max.
    pub fn build_pagination(&self, raw: &RawParams) -> PaginationSpec {
        let limit = parse_positive(raw.get(LIMIT_PARAM).map(String::as_str))
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);
        let page = parse_positive(raw.get(PAGE_PARAM).map(String::as_str)).unwrap_or(DEFAULT_PAGE);

        PaginationSpec::new(limit, page)
    }

    pub fn build_sort(&self, sort_by: Option<&str>) -> SortSpec {
        sort_by.map(SortSpec::parse).unwrap_or_default()
    }

    pub fn build_projection(&self, project_by: Option<&str>) -> PlannerResult<ProjectionSpec> {
        match project_by {
            Some(raw) => ProjectionSpec::parse(raw),
            None => Ok(ProjectionSpec::default()),
        }
    }

    /// Validate the parts against the schema and complete them into an
    /// executable plan.
    pub fn plan(
        &self,
        filter: FilterSpec,
        pagination: PaginationSpec,
        sort: SortSpec,
        projection: ProjectionSpec,
    ) -> PlannerResult<QueryPlan> {
        Ok(QueryPlan {
            filter,
            sort: self.complete_sort(sort)?,
            projection: self.complete_projection(projection)?,
            skip: pagination.skip(),
            limit: pagination.limit(),
        })
    }

    fn complete_sort(&self, sort: SortSpec) -> PlannerResult<SortSpec> {
        if let Some(key) = sort.keys().iter().find(|k| !S::is_known_field(&k.field)) {
            return Err(PlannerError::InvalidSortField(key.field.clone()));
        }

        let mut sort = if sort.is_empty() {
            S::default_sort()
                .iter()
                .map(|(field, direction)| SortKey::new(*field, *direction))
                .collect()
        } else {
            sort
        };

        if let Some(tiebreaker) = S::tiebreaker() {
            sort.push(SortKey::asc(tiebreaker));
        }

        Ok(sort)
    }

    fn complete_projection(&self, projection: ProjectionSpec) -> PlannerResult<ProjectionSpec> {
        if let Some(field) = projection
            .fields()
            .iter()
            .find(|f| !S::is_restricted(f) && !S::is_known_field(f))
        {
            return Err(PlannerError::UnknownProjectionField(field.clone()));
        }

        if projection.is_empty() {
            return Ok(Self::default_projection());
        }

        match projection.mode() {
            ProjectionMode::Include => {
                let mut projection = projection;
                for field in S::restricted_fields() {
                    if projection.remove(field) {
                        tracing::warn!(field = %field, "Dropping restricted field from projection");
                    }
                }
                if projection.is_empty() {
                    return Ok(Self::default_projection());
                }
                Ok(projection)
            }
            ProjectionMode::Exclude => {
                let mut projection = projection;
                for field in S::restricted_fields() {
                    projection.push(field.to_string());
                }
                Ok(projection)
            }
        }
    }

    fn default_projection() -> ProjectionSpec {
        ProjectionSpec::exclude(
            S::default_hidden()
                .iter()
                .chain(S::restricted_fields())
                .copied(),
        )
    }

    /// Run a plan: count and fetch concurrently, then wrap the page.
    #[instrument(skip_all, fields(limit = pagination.limit(), page = pagination.page()))]
    pub async fn execute<R>(
        &self,
        filter: FilterSpec,
        pagination: PaginationSpec,
        sort: SortSpec,
        projection: ProjectionSpec,
        store: &R,
    ) -> PlannerResult<ResultEnvelope>
    where
        R: RecordStore + ?Sized,
    {
        let plan = self.plan(filter, pagination, sort, projection)?;

        let (total_results, results) = tokio::try_join!(store.count(&plan.filter), store.find(&plan))
            .map_err(|e| {
                tracing::error!(error = %e, "Record store query failed");
                PlannerError::from(e)
            })?;

        tracing::debug!(
            total_results,
            returned = results.len(),
            "Paginated query executed"
        );

        Ok(ResultEnvelope::new(results, pagination, total_results))
    }

    /// Build every part from the raw query string and execute it
    pub async fn paginate<R>(&self, raw: &RawParams, store: &R) -> PlannerResult<ResultEnvelope>
    where
        R: RecordStore + ?Sized,
    {
        let filter = self.build_filter(raw);
        let pagination = self.build_pagination(raw);
        let sort = self.build_sort(raw.get(SORT_BY_PARAM).map(String::as_str));
        let projection = self.build_projection(raw.get(PROJECT_BY_PARAM).map(String::as_str))?;

        self.execute(filter, pagination, sort, projection, store).await
    }
}
