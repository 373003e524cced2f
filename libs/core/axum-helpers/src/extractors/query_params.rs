use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// The query string as a flat map of keys to raw values.
///
/// Repeated keys keep the last value. Interpretation of the values is left
/// to the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state).await?;
        Ok(QueryParams(params))
    }
}
