use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{QueryParams, UuidPath, ValidatedJson};
use query_planner::ResultEnvelope;
use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/categories", get(list_categories))
        .route(
            "/{userId}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List users with filters, sorting, projection and pagination
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(params): QueryParams,
) -> UserResult<Json<ResultEnvelope>> {
    let envelope = service.list_users(&params).await?;
    Ok(Json(envelope))
}

/// List skill categories with user counts
async fn list_categories<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(params): QueryParams,
) -> UserResult<Json<ResultEnvelope>> {
    let envelope = service.list_categories(&params).await?;
    Ok(Json(envelope))
}

/// Create a new user
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Update a user; the body must set at least one field
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
