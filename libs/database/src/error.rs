/// Errors raised while establishing or probing a database connection
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
