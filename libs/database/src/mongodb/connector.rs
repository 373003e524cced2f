use std::time::{Duration, Instant};

use mongodb::{Client, bson::doc, options::ClientOptions};
use tracing::{info, instrument};

use super::MongoConfig;
use crate::error::{DatabaseError, DatabaseResult};
use crate::retry::{RetryPolicy, retry_with_policy};

/// Build a client from the config and verify the server answers a ping
#[instrument(skip(config), fields(url = %config.redacted_url(), database = %config.database))]
pub async fn connect(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options)?;

    ping(&client, &config.database)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Connected to MongoDB");
    Ok(client)
}

/// [`connect`] with exponential backoff, for startup ordering in containers
pub async fn connect_with_retry(
    config: &MongoConfig,
    policy: Option<RetryPolicy>,
) -> DatabaseResult<Client> {
    let policy = policy.unwrap_or_default();
    retry_with_policy(|| connect(config), &policy).await
}

/// Run the `ping` admin command against a database
pub async fn ping(client: &Client, database: &str) -> DatabaseResult<()> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(())
}

/// Result of a readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Ping the database and report latency
pub async fn check_health(client: &Client, database: &str) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client, database).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(DatabaseError::HealthCheckFailed(e.to_string()).to_string()),
            response_time_ms,
        },
    }
}
