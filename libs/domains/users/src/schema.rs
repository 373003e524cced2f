//! Query allow-lists for the user collection and the skill categories.

use query_planner::{FilterField, QuerySchema, SortDirection};

/// `GET /users` query shape
pub struct UserSchema;

impl QuerySchema for UserSchema {
    fn filter_fields() -> &'static [FilterField] {
        const FIELDS: &[FilterField] = &[
            FilterField::element("skills"),
            FilterField::exact("email"),
            FilterField::partial("firstName"),
        ];
        FIELDS
    }

    fn available_fields() -> &'static [&'static str] {
        &[
            "id",
            "firstName",
            "lastName",
            "email",
            "role",
            "profileUrl",
            "headline",
            "summary",
            "location",
            "instagramLink",
            "behanceLink",
            "isVerified",
            "skills",
            "jobPreferences",
            "portfolio",
            "certifications",
            "educations",
            "createdAt",
            "updatedAt",
        ]
    }

    fn restricted_fields() -> &'static [&'static str] {
        &["passwordHash"]
    }

    fn default_sort() -> &'static [(&'static str, SortDirection)] {
        &[("createdAt", SortDirection::Asc)]
    }

    fn default_hidden() -> &'static [&'static str] {
        &["createdAt", "updatedAt"]
    }

    fn tiebreaker() -> Option<&'static str> {
        Some("id")
    }
}

/// `GET /users/categories` query shape
pub struct CategorySchema;

impl QuerySchema for CategorySchema {
    fn filter_fields() -> &'static [FilterField] {
        &[]
    }

    fn available_fields() -> &'static [&'static str] {
        &["name", "userCount"]
    }

    fn default_sort() -> &'static [(&'static str, SortDirection)] {
        &[("userCount", SortDirection::Desc)]
    }

    fn tiebreaker() -> Option<&'static str> {
        Some("name")
    }
}
