//! Readiness endpoint

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies the MongoDB connection
async fn readiness_check(State(state): State<AppState>) -> Response {
    let mongodb: HealthCheckFuture<'_> = Box::pin(async {
        let status =
            database::mongodb::check_health(&state.mongo_client, state.config.mongodb.database())
                .await;
        tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");

        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
