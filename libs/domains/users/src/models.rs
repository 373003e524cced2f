use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User roles
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A portfolio entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Portfolio {
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[validate(length(min = 1))]
    pub certificate_name: String,
    pub course: String,
    pub provider: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[validate(length(min = 1))]
    pub course_name: String,
    pub university: String,
    pub country: String,
    #[validate(range(min = 1900, max = 2100))]
    pub start_year: i32,
    #[validate(range(min = 1900, max = 2100))]
    pub end_year: i32,
}

/// User profile as stored in the `users` collection
///
/// Field names are camelCase in storage and on the wire. `passwordHash`
/// is stored but never leaves the service; use [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(with = "uuid_string")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behance_link: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub job_preferences: Vec<String>,
    #[serde(default)]
    pub portfolio: Vec<Portfolio>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behance_link: Option<String>,
    pub is_verified: bool,
    pub skills: Vec<String>,
    pub job_preferences: Vec<String>,
    pub portfolio: Vec<Portfolio>,
    pub certifications: Vec<Certification>,
    pub educations: Vec<Education>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            profile_url: user.profile_url,
            headline: user.headline,
            summary: user.summary,
            location: user.location,
            instagram_link: user.instagram_link,
            behance_link: user.behance_link,
            is_verified: user.is_verified,
            skills: user.skills,
            job_preferences: user.job_preferences,
            portfolio: user.portfolio,
            certifications: user.certifications,
            educations: user.educations,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub role: Role,
    pub profile_url: Option<String>,
    #[validate(length(max = 200))]
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub instagram_link: Option<String>,
    pub behance_link: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub job_preferences: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub portfolio: Vec<Portfolio>,
    #[serde(default)]
    #[validate(nested)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    #[validate(nested)]
    pub educations: Vec<Education>,
}

/// DTO for updating an existing user; at least one field must be set
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_not_empty"))]
pub struct UpdateUser {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password"))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub profile_url: Option<String>,
    #[validate(length(max = 200))]
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub instagram_link: Option<String>,
    pub behance_link: Option<String>,
    pub is_verified: Option<bool>,
    pub skills: Option<Vec<String>>,
    pub job_preferences: Option<Vec<String>>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.profile_url.is_none()
            && self.headline.is_none()
            && self.summary.is_none()
            && self.location.is_none()
            && self.instagram_link.is_none()
            && self.behance_link.is_none()
            && self.is_verified.is_none()
            && self.skills.is_none()
            && self.job_preferences.is_none()
    }
}

/// A distinct skill and the number of users listing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub name: String,
    pub user_count: u64,
}

/// At least 8 characters with at least one letter and one digit
fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(ValidationError::new("password_too_short")
            .with_message("password must be at least 8 characters".into()));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(ValidationError::new("password_too_weak")
            .with_message("password must contain at least 1 letter and 1 number".into()));
    }

    Ok(())
}

fn validate_update_not_empty(update: &UpdateUser) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::new("empty_update")
            .with_message("at least one field must be provided".into()));
    }
    Ok(())
}

impl User {
    /// Create a new user from CreateUser DTO and an already hashed password
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            role: input.role,
            profile_url: input.profile_url,
            headline: input.headline,
            summary: input.summary,
            location: input.location,
            instagram_link: input.instagram_link,
            behance_link: input.behance_link,
            is_verified: input.is_verified,
            skills: input.skills,
            job_preferences: input.job_preferences,
            portfolio: input.portfolio,
            certifications: input.certifications,
            educations: input.educations,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates (the password must already be hashed if provided)
    pub fn apply_update(&mut self, update: UpdateUser, password_hash: Option<String>) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(profile_url) = update.profile_url {
            self.profile_url = Some(profile_url);
        }
        if let Some(headline) = update.headline {
            self.headline = Some(headline);
        }
        if let Some(summary) = update.summary {
            self.summary = Some(summary);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(instagram_link) = update.instagram_link {
            self.instagram_link = Some(instagram_link);
        }
        if let Some(behance_link) = update.behance_link {
            self.behance_link = Some(behance_link);
        }
        if let Some(is_verified) = update.is_verified {
            self.is_verified = is_verified;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(job_preferences) = update.job_preferences {
            self.job_preferences = job_preferences;
        }
        self.updated_at = Utc::now();
    }
}

/// Fixed-width RFC 3339 with milliseconds, so stored values sort as strings
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// UUIDs are stored as hyphenated strings, including in binary formats
pub(crate) mod uuid_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(value: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.hyphenated())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}
