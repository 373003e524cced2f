use async_trait::async_trait;
use query_planner::RecordStore;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{SkillCategory, User};

/// Repository trait for user persistence
///
/// Listing goes through the [`RecordStore`] supertrait so the query planner
/// can drive it; everything else works on whole [`User`] documents.
#[async_trait]
pub trait UserRepository: RecordStore {
    /// Insert a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Replace a stored user, matched by ID
    async fn update(&self, user: &User) -> UserResult<()>;

    /// Delete a user by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;

    /// Distinct skills with the number of users listing each one
    async fn skill_counts(&self) -> UserResult<Vec<SkillCategory>>;
}
