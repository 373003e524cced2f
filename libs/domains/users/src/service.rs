//! User Service - Business logic layer

use std::sync::Arc;

use query_planner::{
    FilterSpec, MemoryRecordStore, PaginationConfig, ProjectionSpec, QueryPlanner, RawParams,
    ResultEnvelope, SORT_BY_PARAM,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::schema::{CategorySchema, UserSchema};

/// User service providing business logic operations
///
/// Listing is delegated to the query planner; the repository only sees
/// validated plans.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    users: QueryPlanner<UserSchema>,
    categories: QueryPlanner<CategorySchema>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(
        repository: R,
        hasher: impl PasswordHasher + 'static,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
            users: QueryPlanner::new(pagination),
            categories: QueryPlanner::new(pagination),
        }
    }

    /// Create a new user
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input.validate()?;

        if self.repository.exists_by_email(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repository
            .create(User::new(input, password_hash))
            .await?;

        Ok(user.into())
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound(id))
    }

    /// List users from raw query-string parameters
    #[instrument(skip_all)]
    pub async fn list_users(&self, params: &RawParams) -> UserResult<ResultEnvelope> {
        let envelope = self
            .users
            .paginate(params, self.repository.as_ref())
            .await?;

        tracing::debug!(total_results = envelope.total_results, "Users listed");
        Ok(envelope)
    }

    /// List skill categories; only `sortBy`, `limit` and `page` are honoured
    #[instrument(skip_all)]
    pub async fn list_categories(&self, params: &RawParams) -> UserResult<ResultEnvelope> {
        let categories = self.repository.skill_counts().await?;
        let store = categories
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<MemoryRecordStore, _>>()
            .map_err(|e| UserError::Database(e.to_string()))?;

        let envelope = self
            .categories
            .execute(
                FilterSpec::new(),
                self.categories.build_pagination(params),
                self.categories
                    .build_sort(params.get(SORT_BY_PARAM).map(String::as_str)),
                ProjectionSpec::default(),
                &store,
            )
            .await?;

        Ok(envelope)
    }

    /// Update an existing user
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        input.validate()?;

        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(ref email) = input.email {
            if email != &user.email && self.repository.exists_by_email(email).await? {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let password_hash = input
            .password
            .as_deref()
            .map(|password| self.hasher.hash(password))
            .transpose()?;

        user.apply_update(input, password_hash);
        self.repository.update(&user).await?;

        Ok(user.into())
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
            users: self.users.clone(),
            categories: self.categories.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SkillCategory};
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};
    use query_planner::{PlannerError, QueryPlan, Record, RecordStore, StoreError};
    use serde_json::json;

    mock! {
        pub Repo {}

        #[async_trait]
        impl RecordStore for Repo {
            async fn count(&self, filter: &FilterSpec) -> Result<u64, StoreError>;
            async fn find(&self, plan: &QueryPlan) -> Result<Vec<Record>, StoreError>;
        }

        #[async_trait]
        impl UserRepository for Repo {
            async fn create(&self, user: User) -> UserResult<User>;
            async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;
            async fn update(&self, user: &User) -> UserResult<()>;
            async fn delete(&self, id: Uuid) -> UserResult<bool>;
            async fn exists_by_email(&self, email: &str) -> UserResult<bool>;
            async fn skill_counts(&self) -> UserResult<Vec<SkillCategory>>;
        }
    }

    struct PrefixHasher;

    impl PasswordHasher for PrefixHasher {
        fn hash(&self, password: &str) -> UserResult<String> {
            Ok(format!("hashed:{}", password))
        }
    }

    fn service(repo: MockRepo) -> UserService<MockRepo> {
        UserService::new(repo, PrefixHasher, PaginationConfig::default())
    }

    fn create_input(email: &str) -> CreateUser {
        serde_json::from_value(json!({
            "email": email,
            "password": "Tech@2023",
            "firstName": "Hiren",
            "lastName": "Patel",
            "role": "user"
        }))
        .unwrap()
    }

    fn stored_user(email: &str) -> User {
        User::new(create_input(email), "hashed:Tech@2023".to_string())
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockRepo::new();
        repo.expect_exists_by_email()
            .with(eq("hiren@example.com"))
            .returning(|_| Ok(false));
        repo.expect_create()
            .withf(|user| user.password_hash == "hashed:Tech@2023" && user.role == Role::User)
            .times(1)
            .returning(Ok);

        let user = service(repo)
            .create_user(create_input("hiren@example.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "hiren@example.com");
        assert_eq!(user.first_name, "Hiren");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repo = MockRepo::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_create().never();

        let result = service(repo)
            .create_user(create_input("taken@example.com"))
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == "taken@example.com"));
    }

    #[tokio::test]
    async fn test_create_user_rejects_weak_password() {
        let mut repo = MockRepo::new();
        repo.expect_exists_by_email().never();

        let mut input = create_input("weak@example.com");
        input.password = "password".to_string();

        let result = service(repo).create_user(input).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().with(eq(id)).returning(|_| Ok(None));

        let result = service(repo).get_user(id).await;
        assert!(matches!(result, Err(UserError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let user = stored_user("ann@example.com");
        let id = user.id;

        let mut repo = MockRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_exists_by_email().never();
        repo.expect_update()
            .withf(|user| user.password_hash == "hashed:newpass99" && user.first_name == "Ann")
            .times(1)
            .returning(|_| Ok(()));

        let update = UpdateUser {
            first_name: Some("Ann".to_string()),
            password: Some("newpass99".to_string()),
            ..Default::default()
        };

        let updated = service(repo).update_user(id, update).await.unwrap();
        assert_eq!(updated.first_name, "Ann");
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_update_user_email_taken() {
        let user = stored_user("ann@example.com");
        let id = user.id;

        let mut repo = MockRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_exists_by_email()
            .with(eq("bob@example.com"))
            .returning(|_| Ok(true));
        repo.expect_update().never();

        let update = UpdateUser {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };

        let result = service(repo).update_user(id, update).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_user_requires_a_field() {
        let mut repo = MockRepo::new();
        repo.expect_get_by_id().never();

        let result = service(repo)
            .update_user(Uuid::now_v7(), UpdateUser::default())
            .await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockRepo::new();
        repo.expect_delete().returning(|_| Ok(false));

        let result = service(repo).delete_user(Uuid::now_v7()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_sends_safe_plan() {
        let mut repo = MockRepo::new();
        repo.expect_count().returning(|_| Ok(1));
        repo.expect_find()
            .withf(|plan| {
                plan.projection.contains("passwordHash")
                    && plan.filter.get("skills").is_some()
                    && plan.filter.get("role").is_none()
                    && plan.skip == 0
                    && plan.limit == 10
            })
            .returning(|_| Ok(vec![json!({"id": "1", "firstName": "Ann"})]));

        let params: RawParams = [("skills", "UX Designer"), ("role", "admin")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let envelope = service(repo).list_users(&params).await.unwrap();
        assert_eq!(envelope.total_results, 1);
        assert_eq!(envelope.results.len(), 1);
    }

    #[tokio::test]
    async fn test_list_users_store_unavailable() {
        let mut repo = MockRepo::new();
        repo.expect_count()
            .returning(|_| Err(StoreError::Unavailable("connection refused".into())));
        repo.expect_find().returning(|_| Ok(vec![]));

        let result = service(repo).list_users(&RawParams::new()).await;
        assert!(matches!(
            result,
            Err(UserError::Query(PlannerError::StoreUnavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_categories_sorted_and_paged() {
        let mut repo = MockRepo::new();
        repo.expect_skill_counts().returning(|| {
            Ok(vec![
                SkillCategory { name: "Architect".into(), user_count: 2 },
                SkillCategory { name: "UX Designer".into(), user_count: 12 },
                SkillCategory { name: "Researcher".into(), user_count: 5 },
            ])
        });

        let params: RawParams = [("limit", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let envelope = service(repo).list_categories(&params).await.unwrap();

        assert_eq!(envelope.total_results, 3);
        assert_eq!(envelope.total_pages, 2);
        assert_eq!(
            envelope.results,
            vec![
                json!({"name": "UX Designer", "userCount": 12}),
                json!({"name": "Researcher", "userCount": 5}),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_categories_by_name() {
        let mut repo = MockRepo::new();
        repo.expect_skill_counts().returning(|| {
            Ok(vec![
                SkillCategory { name: "Researcher".into(), user_count: 5 },
                SkillCategory { name: "Architect".into(), user_count: 2 },
            ])
        });

        let params: RawParams = [("sortBy", "name:asc"), ("projectBy", "name:hide")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let envelope = service(repo).list_categories(&params).await.unwrap();
        assert_eq!(envelope.results[0]["name"], "Architect");
        assert_eq!(envelope.results[0]["userCount"], 2);
    }

    #[tokio::test]
    async fn test_list_categories_invalid_sort() {
        let mut repo = MockRepo::new();
        repo.expect_skill_counts().returning(|| Ok(vec![]));

        let params: RawParams = [("sortBy".to_string(), "salary:desc".to_string())].into();

        let result = service(repo).list_categories(&params).await;
        assert!(matches!(
            result,
            Err(UserError::Query(PlannerError::InvalidSortField(field))) if field == "salary"
        ));
    }
}
