//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key_error;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc},
    options::{FindOptions, IndexOptions},
};
use query_planner::{
    FilterSpec, MAX_SKIP, MatchStrategy, ProjectionMode, ProjectionSpec, QueryPlan, Record,
    RecordStore, SortSpec, StoreError,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{SkillCategory, User};
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository over the `users` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "users")
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Create the unique indexes on `email` and `id`
    pub async fn create_indexes(&self) -> UserResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(unique())
                .build(),
            IndexModel::builder().keys(doc! { "skills": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("User indexes created");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "id": id.to_string() }
    }

    /// Translate filter clauses into a query document.
    ///
    /// Partial matches are escaped so request values never act as patterns.
    fn build_filter(filter: &FilterSpec) -> Document {
        let mut doc = Document::new();

        for clause in filter.clauses() {
            let value = clause.value.as_str();
            match clause.strategy {
                MatchStrategy::Exact => {
                    doc.insert(clause.field, value);
                }
                MatchStrategy::Partial => {
                    doc.insert(
                        clause.field,
                        doc! { "$regex": regex::escape(value), "$options": "i" },
                    );
                }
                MatchStrategy::Element => {
                    doc.insert(clause.field, doc! { "$in": [value] });
                }
            }
        }

        doc
    }

    fn build_sort(sort: &SortSpec) -> Document {
        sort.keys()
            .iter()
            .map(|key| (key.field.clone(), Bson::Int32(key.direction.as_i32())))
            .collect()
    }

    /// `_id` is internal and always left out
    fn build_projection(projection: &ProjectionSpec) -> Document {
        let flag = match projection.mode() {
            ProjectionMode::Include => 1,
            ProjectionMode::Exclude => 0,
        };

        let mut doc: Document = projection
            .fields()
            .iter()
            .map(|field| (field.clone(), Bson::Int32(flag)))
            .collect();
        doc.insert("_id", 0);
        doc
    }

    /// Offsets and limits are sent as signed 64-bit integers
    fn find_options(plan: &QueryPlan) -> FindOptions {
        FindOptions::builder()
            .sort(Self::build_sort(&plan.sort))
            .projection(Self::build_projection(&plan.projection))
            .skip(plan.skip.min(MAX_SKIP))
            .limit(i64::try_from(plan.limit).unwrap_or(i64::MAX))
            .build()
    }

    fn unavailable(err: mongodb::error::Error) -> StoreError {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl RecordStore for MongoUserRepository {
    #[instrument(skip_all)]
    async fn count(&self, filter: &FilterSpec) -> Result<u64, StoreError> {
        self.collection
            .count_documents(Self::build_filter(filter))
            .await
            .map_err(Self::unavailable)
    }

    #[instrument(skip_all, fields(skip = plan.skip, limit = plan.limit))]
    async fn find(&self, plan: &QueryPlan) -> Result<Vec<Record>, StoreError> {
        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(Self::build_filter(&plan.filter))
            .with_options(Self::find_options(plan))
            .await
            .map_err(Self::unavailable)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(Self::unavailable)?;

        Ok(documents
            .into_iter()
            .map(|doc| Bson::Document(doc).into_relaxed_extjson())
            .collect())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => {
                tracing::info!(user_id = %user.id, "User created successfully");
                Ok(user)
            }
            Err(e) if is_duplicate_key_error(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> UserResult<()> {
        let result = self
            .collection
            .replace_one(Self::id_filter(user.id), user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    UserError::DuplicateEmail(user.email.clone())
                } else {
                    e.into()
                }
            })?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(user.id));
        }

        tracing::info!(user_id = %user.id, "User updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn skill_counts(&self) -> UserResult<Vec<SkillCategory>> {
        let pipeline = vec![
            doc! { "$unwind": "$skills" },
            doc! { "$group": { "_id": "$skills", "userCount": { "$sum": 1 } } },
            doc! { "$project": { "_id": 0, "name": "$_id", "userCount": 1 } },
        ];

        let cursor = self.collection.aggregate(pipeline).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|doc| {
                mongodb::bson::from_document::<SkillCategory>(doc)
                    .map_err(|e| UserError::Database(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_planner::{FilterClause, PaginationSpec, SortKey};

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoUserRepository::build_filter(&FilterSpec::new());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_strategies() {
        let filter = FilterSpec::new()
            .with_clause(FilterClause::new(
                "skills",
                MatchStrategy::Element,
                "UX Designer",
            ))
            .with_clause(FilterClause::new(
                "email",
                MatchStrategy::Exact,
                "ann@example.com",
            ))
            .with_clause(FilterClause::new("firstName", MatchStrategy::Partial, "an"));

        let doc = MongoUserRepository::build_filter(&filter);

        assert_eq!(doc.get_document("skills").unwrap(), &doc! { "$in": ["UX Designer"] });
        assert_eq!(doc.get_str("email").unwrap(), "ann@example.com");
        assert_eq!(
            doc.get_document("firstName").unwrap(),
            &doc! { "$regex": "an", "$options": "i" }
        );
    }

    #[test]
    fn test_partial_filter_escapes_pattern() {
        let filter = FilterSpec::new().with_clause(FilterClause::new(
            "firstName",
            MatchStrategy::Partial,
            ".*(a+)+$",
        ));

        let doc = MongoUserRepository::build_filter(&filter);
        let pattern = doc
            .get_document("firstName")
            .unwrap()
            .get_str("$regex")
            .unwrap();

        assert_eq!(pattern, r"\.\*\(a\+\)\+\$");
    }

    #[test]
    fn test_exact_filter_is_not_an_operator() {
        let filter = FilterSpec::new().with_clause(FilterClause::new(
            "email",
            MatchStrategy::Exact,
            r#"{"$ne": null}"#,
        ));

        let doc = MongoUserRepository::build_filter(&filter);
        assert_eq!(doc.get_str("email").unwrap(), r#"{"$ne": null}"#);
    }

    #[test]
    fn test_build_sort_keeps_order() {
        let sort: SortSpec = [SortKey::desc("firstName"), SortKey::asc("id")]
            .into_iter()
            .collect();

        let doc = MongoUserRepository::build_sort(&sort);
        let keys: Vec<&String> = doc.keys().collect();

        assert_eq!(keys, vec!["firstName", "id"]);
        assert_eq!(doc.get_i32("firstName").unwrap(), -1);
        assert_eq!(doc.get_i32("id").unwrap(), 1);
    }

    #[test]
    fn test_build_projection_always_drops_internal_id() {
        let include = ProjectionSpec::include(["firstName", "email"]);
        assert_eq!(
            MongoUserRepository::build_projection(&include),
            doc! { "firstName": 1, "email": 1, "_id": 0 }
        );

        let exclude = ProjectionSpec::exclude(["passwordHash"]);
        assert_eq!(
            MongoUserRepository::build_projection(&exclude),
            doc! { "passwordHash": 0, "_id": 0 }
        );
    }

    #[test]
    fn test_find_options_serialize_for_huge_page() {
        let pagination = PaginationSpec::new(100, 100_000_000_000_000_000);
        let plan = QueryPlan {
            filter: FilterSpec::new(),
            sort: [SortKey::asc("id")].into_iter().collect(),
            projection: ProjectionSpec::exclude(["passwordHash"]),
            skip: pagination.skip(),
            limit: pagination.limit(),
        };

        let options = MongoUserRepository::find_options(&plan);
        let doc = mongodb::bson::to_document(&options).unwrap();

        assert_eq!(doc.get_i64("skip").unwrap(), i64::MAX);
        assert_eq!(doc.get_i64("limit").unwrap(), 100);
    }

    #[test]
    fn test_find_options_clamp_oversized_skip() {
        let plan = QueryPlan {
            filter: FilterSpec::new(),
            sort: SortSpec::new(),
            projection: ProjectionSpec::default(),
            skip: u64::MAX,
            limit: 10,
        };

        let options = MongoUserRepository::find_options(&plan);
        assert_eq!(options.skip, Some(MAX_SKIP));
        assert!(mongodb::bson::to_document(&options).is_ok());
    }

    #[test]
    fn test_id_filter_uses_string_form() {
        let id = Uuid::now_v7();
        assert_eq!(
            MongoUserRepository::id_filter(id).get_str("id").unwrap(),
            id.to_string()
        );
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB instance"]
    async fn test_create_indexes_against_local_mongo() {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let repo = MongoUserRepository::with_collection(&client.database("profiles_test"), "users");
        repo.create_indexes().await.unwrap();
    }
}
