//! Sort key parsing.

use std::fmt;

use crate::tokens::field_modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any case) sorts descending; anything else sorts ascending
    pub fn from_modifier(modifier: Option<&str>) -> Self {
        match modifier {
            Some(m) if m.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    /// Signed form used by document stores (`1` / `-1`)
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Ordered sort keys; earlier keys take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `field:dir,field:dir`.
    ///
    /// Field names are not checked here. A field repeated later in the
    /// string is ignored.
    pub fn parse(raw: &str) -> Self {
        let mut spec = Self::new();
        for (field, modifier) in field_modifiers(raw) {
            spec.push(SortKey::new(field, SortDirection::from_modifier(modifier)));
        }
        spec
    }

    /// Append a key unless its field is already sorted on
    pub fn push(&mut self, key: SortKey) {
        if !self.contains(&key.field) {
            self.keys.push(key);
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.keys.iter().any(|k| k.field == field)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl FromIterator<SortKey> for SortSpec {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        let mut spec = Self::new();
        for key in iter {
            spec.push(key);
        }
        spec
    }
}
