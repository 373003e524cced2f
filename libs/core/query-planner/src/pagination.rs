//! Page size and offset handling.

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

/// Page size used when the request does not give a valid one
pub const DEFAULT_LIMIT: u64 = 10;

/// First page
pub const DEFAULT_PAGE: u64 = 1;

/// Upper bound on the page size
pub const MAX_LIMIT: u64 = 100;

/// Largest offset a store can take; BSON integers are signed 64-bit
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Pagination bounds, loaded once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl PaginationConfig {
    /// Create a config, clamping values into `1 <= default_limit <= max_limit`
    pub fn new(default_limit: u64, max_limit: u64) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            default_limit: default_limit.clamp(1, max_limit),
            max_limit,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Load PaginationConfig from environment variables
///
/// - `PAGINATION_DEFAULT_LIMIT` (optional, default: 10)
/// - `PAGINATION_MAX_LIMIT` (optional, default: 100)
#[cfg(feature = "config")]
impl FromEnv for PaginationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_limit = env_parse_or("PAGINATION_DEFAULT_LIMIT", DEFAULT_LIMIT)?;
        let max_limit = env_parse_or("PAGINATION_MAX_LIMIT", MAX_LIMIT)?;

        if default_limit == 0 || max_limit == 0 || default_limit > max_limit {
            return Err(ConfigError::ParseError {
                key: "PAGINATION_DEFAULT_LIMIT".to_string(),
                details: format!(
                    "default limit {} must be between 1 and the max limit {}",
                    default_limit, max_limit
                ),
            });
        }

        Ok(Self {
            default_limit,
            max_limit,
        })
    }
}

/// Normalized page size and page number; both are always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSpec {
    limit: u64,
    page: u64,
}

impl PaginationSpec {
    pub fn new(limit: u64, page: u64) -> Self {
        Self {
            limit: limit.max(1),
            page: page.max(1),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Number of records to skip: `limit * (page - 1)`, capped at [`MAX_SKIP`]
    pub fn skip(&self) -> u64 {
        self.limit.saturating_mul(self.page - 1).min(MAX_SKIP)
    }

    /// `ceil(total_results / limit)`
    pub fn total_pages(&self, total_results: u64) -> u64 {
        total_results.div_ceil(self.limit)
    }
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_PAGE)
    }
}

/// Parse a strictly positive integer, ignoring surrounding whitespace
pub(crate) fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
}
