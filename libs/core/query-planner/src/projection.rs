//! Field projection parsing.

use serde_json::{Map, Value};

use crate::error::{PlannerError, PlannerResult};
use crate::tokens::field_modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Include,
    Exclude,
}

impl ProjectionMode {
    /// `hide` (any case) excludes the field; anything else includes it
    pub fn from_modifier(modifier: Option<&str>) -> Self {
        match modifier {
            Some(m) if m.eq_ignore_ascii_case("hide") => ProjectionMode::Exclude,
            _ => ProjectionMode::Include,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionField {
    pub field: String,
    pub mode: ProjectionMode,
}

/// A projection made of fields that all share one mode.
///
/// An empty projection returns records untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSpec {
    mode: ProjectionMode,
    fields: Vec<String>,
}

impl Default for ProjectionSpec {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Exclude,
            fields: Vec::new(),
        }
    }
}

impl ProjectionSpec {
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_fields(ProjectionMode::Include, fields)
    }

    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_fields(ProjectionMode::Exclude, fields)
    }

    fn from_fields<I, S>(mode: ProjectionMode, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = Self {
            mode,
            fields: Vec::new(),
        };
        for field in fields {
            spec.push(field.into());
        }
        spec
    }

    /// Parse `field:show,field:hide`.
    ///
    /// Mixing included and hidden fields is rejected. Field names are not
    /// checked here.
    pub fn parse(raw: &str) -> PlannerResult<Self> {
        let parsed: Vec<ProjectionField> = field_modifiers(raw)
            .map(|(field, modifier)| ProjectionField {
                field: field.to_string(),
                mode: ProjectionMode::from_modifier(modifier),
            })
            .collect();

        let Some(first) = parsed.first() else {
            return Ok(Self::default());
        };
        let mode = first.mode;

        if parsed.iter().any(|p| p.mode != mode) {
            return Err(PlannerError::ConflictingProjectionModes);
        }

        Ok(Self::from_fields(mode, parsed.into_iter().map(|p| p.field)))
    }

    /// Add a field, ignoring duplicates
    pub fn push(&mut self, field: String) {
        if !self.contains(&field) {
            self.fields.push(field);
        }
    }

    /// Drop a field from the list
    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f != field);
        before != self.fields.len()
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Apply the projection to a JSON object. Non-object records pass through.
    pub fn apply(&self, record: Value) -> Value {
        if self.fields.is_empty() {
            return record;
        }

        match record {
            Value::Object(map) => {
                let projected: Map<String, Value> = match self.mode {
                    ProjectionMode::Include => map
                        .into_iter()
                        .filter(|(key, _)| self.contains(key))
                        .collect(),
                    ProjectionMode::Exclude => map
                        .into_iter()
                        .filter(|(key, _)| !self.contains(key))
                        .collect(),
                };
                Value::Object(projected)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_include() {
        let spec = ProjectionSpec::parse("firstName:show,email:show").unwrap();
        assert_eq!(spec.mode(), ProjectionMode::Include);
        assert_eq!(spec.fields(), &["firstName".to_string(), "email".to_string()]);
    }

    #[test]
    fn test_parse_exclude() {
        let spec = ProjectionSpec::parse("email:hide, bio:HIDE").unwrap();
        assert_eq!(spec.mode(), ProjectionMode::Exclude);
        assert_eq!(spec.fields().len(), 2);
    }

    #[test]
    fn test_parse_missing_modifier_includes() {
        let spec = ProjectionSpec::parse("firstName").unwrap();
        assert_eq!(spec.mode(), ProjectionMode::Include);
    }

    #[test]
    fn test_parse_conflicting_modes() {
        let err = ProjectionSpec::parse("firstName:show,email:hide").unwrap_err();
        assert_eq!(err, PlannerError::ConflictingProjectionModes);
    }

    #[test]
    fn test_parse_empty() {
        let spec = ProjectionSpec::parse("").unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let spec = ProjectionSpec::parse("email:hide,email:hide").unwrap();
        assert_eq!(spec.fields().len(), 1);
    }

    #[test]
    fn test_apply_include() {
        let spec = ProjectionSpec::include(["firstName"]);
        let out = spec.apply(json!({"firstName": "Ann", "email": "ann@example.com"}));
        assert_eq!(out, json!({"firstName": "Ann"}));
    }

    #[test]
    fn test_apply_exclude() {
        let spec = ProjectionSpec::exclude(["email"]);
        let out = spec.apply(json!({"firstName": "Ann", "email": "ann@example.com"}));
        assert_eq!(out, json!({"firstName": "Ann"}));
    }

    #[test]
    fn test_apply_empty_is_identity() {
        let record = json!({"firstName": "Ann"});
        assert_eq!(ProjectionSpec::default().apply(record.clone()), record);
    }

    #[test]
    fn test_remove() {
        let mut spec = ProjectionSpec::include(["firstName", "passwordHash"]);
        assert!(spec.remove("passwordHash"));
        assert!(!spec.remove("passwordHash"));
        assert_eq!(spec.fields(), &["firstName".to_string()]);
    }
}
