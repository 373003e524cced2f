//! MongoDB connector and helpers

mod config;
mod connector;
mod errors;

pub use config::MongoConfig;
pub use connector::{HealthStatus, check_health, connect, connect_with_retry, ping};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key_error};

pub use mongodb::{Client, Collection, Database};
