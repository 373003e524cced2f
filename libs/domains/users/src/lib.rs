//! Users Domain
//!
//! User profiles stored in MongoDB, listed through the query planner.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, hashing, query planning
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← RecordStore + CRUD (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{Argon2Hasher, MongoUserRepository, UserService, handlers};
//! use mongodb::Client;
//! use query_planner::PaginationConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("profiles");
//!
//! let repository = MongoUserRepository::new(&db);
//! repository.create_indexes().await?;
//!
//! let service = UserService::new(repository, Argon2Hasher::new(), PaginationConfig::default());
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod schema;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{
    Certification, CreateUser, Education, Portfolio, Role, SkillCategory, UpdateUser, User,
    UserResponse,
};
pub use crate::mongodb::MongoUserRepository;
pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::UserRepository;
pub use schema::{CategorySchema, UserSchema};
pub use service::UserService;
