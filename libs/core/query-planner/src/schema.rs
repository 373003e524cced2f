//! Field allow-lists describing how a collection may be queried.

use crate::sort::SortDirection;

/// How a filter value is compared against a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Field value equals the filter value
    Exact,
    /// Case-insensitive substring match; stores must escape the value
    Partial,
    /// Array field holding the value as one of its elements
    Element,
}

/// A query-string key that is allowed to become a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub name: &'static str,
    pub strategy: MatchStrategy,
}

impl FilterField {
    pub const fn exact(name: &'static str) -> Self {
        Self {
            name,
            strategy: MatchStrategy::Exact,
        }
    }

    pub const fn partial(name: &'static str) -> Self {
        Self {
            name,
            strategy: MatchStrategy::Partial,
        }
    }

    pub const fn element(name: &'static str) -> Self {
        Self {
            name,
            strategy: MatchStrategy::Element,
        }
    }
}

/// Describes the queryable shape of a record collection.
///
/// Implement this on a marker type per collection. Only the fields listed
/// here can be filtered, sorted or projected; everything else in a request
/// is dropped or rejected by the planner.
pub trait QuerySchema: Send + Sync + 'static {
    /// Query-string keys that are turned into filter clauses
    fn filter_fields() -> &'static [FilterField];

    /// Every public field of the record shape
    fn available_fields() -> &'static [&'static str];

    /// Fields that must never be returned, whatever the projection says
    fn restricted_fields() -> &'static [&'static str] {
        &[]
    }

    /// Sort applied when the request does not provide one
    fn default_sort() -> &'static [(&'static str, SortDirection)] {
        &[]
    }

    /// Fields hidden when the request does not provide a projection
    fn default_hidden() -> &'static [&'static str] {
        &[]
    }

    /// Unique field appended to every sort to keep page boundaries stable
    fn tiebreaker() -> Option<&'static str> {
        None
    }

    fn is_known_field(field: &str) -> bool {
        Self::available_fields().contains(&field)
    }

    fn is_restricted(field: &str) -> bool {
        Self::restricted_fields().contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Accounts;

    impl QuerySchema for Accounts {
        fn filter_fields() -> &'static [FilterField] {
            const FIELDS: &[FilterField] = &[FilterField::exact("email")];
            FIELDS
        }

        fn available_fields() -> &'static [&'static str] {
            &["id", "email"]
        }

        fn restricted_fields() -> &'static [&'static str] {
            &["secret"]
        }
    }

    #[test]
    fn test_filter_field_constructors() {
        assert_eq!(FilterField::exact("a").strategy, MatchStrategy::Exact);
        assert_eq!(FilterField::partial("a").strategy, MatchStrategy::Partial);
        assert_eq!(FilterField::element("a").strategy, MatchStrategy::Element);
    }

    #[test]
    fn test_schema_lookups() {
        assert!(Accounts::is_known_field("email"));
        assert!(!Accounts::is_known_field("secret"));
        assert!(Accounts::is_restricted("secret"));
        assert!(Accounts::default_sort().is_empty());
        assert!(Accounts::tiebreaker().is_none());
    }
}
