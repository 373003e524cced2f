use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

/// HTTP listener settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request
    pub request_timeout: Duration,
    /// Time allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// - `HOST` (default `0.0.0.0`)
    /// - `PORT` (default `8080`)
    /// - `REQUEST_TIMEOUT_SECS` (default `30`)
    /// - `SHUTDOWN_TIMEOUT_SECS` (default `30`)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string()),
            port: env_parse_or("PORT", 8080)?,
            request_timeout: Duration::from_secs(env_parse_or("REQUEST_TIMEOUT_SECS", 30)?),
            shutdown_timeout: Duration::from_secs(env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30)?),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}
