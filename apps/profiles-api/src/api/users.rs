//! Users API routes

use axum::Router;
use domain_users::{Argon2Hasher, MongoUserRepository, UserResult, UserService, handlers};

use crate::state::AppState;

/// Create the unique indexes the users collection relies on
pub async fn init_indexes(state: &AppState) -> UserResult<()> {
    MongoUserRepository::new(&state.db).create_indexes().await
}

/// Create users router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = UserService::new(repository, Argon2Hasher::new(), state.config.pagination);

    handlers::router(service)
}
