//! Connection management for the profile store.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health probe and error helpers
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod error;
pub mod retry;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryPolicy, retry_with_policy};
