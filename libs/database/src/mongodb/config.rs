#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

/// MongoDB connection settings
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017", "profiles")
///     .with_app_name("profiles-api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// `mongodb://[username:password@]host[:port][/database][?options]`
    pub url: String,
    pub database: String,
    /// Reported to the server in its logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_pool_size(mut self, min_pool_size: u32, max_pool_size: u32) -> Self {
        self.min_pool_size = min_pool_size;
        self.max_pool_size = max_pool_size;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection URL with the password replaced, safe to log
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "profiles".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url: first_of("MONGODB_URL", "MONGO_URL")?,
            database: first_of("MONGODB_DATABASE", "MONGO_DATABASE")?,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(feature = "config")]
fn first_of(primary: &str, fallback: &str) -> Result<String, ConfigError> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| ConfigError::MissingEnvVar(format!("{} or {}", primary, fallback)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_pool_defaults() {
        let config = MongoConfig::new("mongodb://db:27017", "people");
        assert_eq!(config.url(), "mongodb://db:27017");
        assert_eq!(config.database(), "people");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
        assert!(config.app_name.is_none());
    }

    #[test]
    fn test_builders() {
        let config = MongoConfig::default()
            .with_app_name("profiles-api")
            .with_pool_size(2, 20);
        assert_eq!(config.app_name.as_deref(), Some("profiles-api"));
        assert_eq!(config.min_pool_size, 2);
        assert_eq!(config.max_pool_size, 20);
    }

    #[test]
    fn test_redacted_url() {
        let config = MongoConfig::new("mongodb://admin:hunter2@db:27017/?authSource=admin", "p");
        assert_eq!(
            config.redacted_url(),
            "mongodb://admin:***@db:27017/?authSource=admin"
        );

        let config = MongoConfig::new("mongodb://localhost:27017", "p");
        assert_eq!(config.redacted_url(), "mongodb://localhost:27017");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("profiles_test")),
                ("MONGODB_MAX_POOL_SIZE", Some("12")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "profiles_test");
                assert_eq!(config.max_pool_size, 12);
                assert_eq!(config.connect_timeout_secs, 10);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_fallback_names() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_missing_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("profiles")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_URL"));
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_invalid_pool_size() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("profiles")),
                ("MONGODB_MIN_POOL_SIZE", Some("few")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_MIN_POOL_SIZE"));
            },
        );
    }
}
