use axum_helpers::server::{create_router, health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "Connecting to MongoDB");

    let mongo_client = database::mongodb::connect_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        database = config.mongodb.database(),
        "Successfully connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    api::users::init_indexes(&state).await?;

    let api_routes = api::routes(&state);
    let router = create_router(api_routes, &state.config.server)?;
    let app = router.merge(health_router(state.config.app.clone()));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting profiles API"
    );

    let mongo_client = state.mongo_client.clone();
    serve(app, &state.config.server, async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed successfully");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Profiles API shutdown complete");
    Ok(())
}
