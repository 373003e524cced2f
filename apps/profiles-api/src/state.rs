//! Shared application state passed to the API route builders.

use mongodb::{Client, Database};

/// Cloned per router (the MongoDB handles share one connection pool)
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded once at startup
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// The profiles database
    pub db: Database,
}
