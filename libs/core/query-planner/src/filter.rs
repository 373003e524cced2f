//! Normalized filter conditions.

use serde_json::Value;

use crate::schema::MatchStrategy;
use crate::store::Record;

/// A single allow-listed condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: &'static str,
    pub strategy: MatchStrategy,
    /// Raw request value. Never interpreted as an operator or a pattern.
    pub value: String,
}

impl FilterClause {
    pub fn new(field: &'static str, strategy: MatchStrategy, value: impl Into<String>) -> Self {
        Self {
            field,
            strategy,
            value: value.into(),
        }
    }

    /// Check if a record satisfies this clause
    pub fn matches(&self, record: &Record) -> bool {
        let Some(field_value) = record.get(self.field) else {
            return false;
        };

        match self.strategy {
            MatchStrategy::Exact => field_value.as_str() == Some(self.value.as_str()),
            MatchStrategy::Partial => field_value
                .as_str()
                .is_some_and(|s| s.to_lowercase().contains(&self.value.to_lowercase())),
            MatchStrategy::Element => match field_value {
                Value::Array(items) => items
                    .iter()
                    .any(|item| item.as_str() == Some(self.value.as_str())),
                other => other.as_str() == Some(self.value.as_str()),
            },
        }
    }
}

/// Conditions combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    clauses: Vec<FilterClause>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clause(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn get(&self, field: &str) -> Option<&FilterClause> {
        self.clauses.iter().find(|c| c.field == field)
    }

    /// Check if a record matches all clauses
    pub fn matches(&self, record: &Record) -> bool {
        self.clauses.iter().all(|c| c.matches(record))
    }
}
