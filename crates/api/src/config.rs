use std::str::FromStr;
use std::time::Duration;

use eventhub_events::dispatcher::{DEFAULT_DISPATCH_TIMEOUT, DEFAULT_FANOUT_CONCURRENCY};

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8081`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Outbound directory and notification settings.
    pub notifications: NotificationConfig,
}

/// Where and how notifications are fanned out.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Base URL of the participant directory.
    pub directory_base_url: String,
    /// Base URL of the notifications service.
    pub sink_base_url: String,
    /// Per-submission timeout.
    pub dispatch_timeout: Duration,
    /// Concurrent submissions during a fan-out.
    pub fanout_concurrency: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            directory_base_url: "http://localhost:8082/api/auth".into(),
            sink_base_url: "http://localhost:8083/api".into(),
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            fanout_concurrency: DEFAULT_FANOUT_CONCURRENCY,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `HOST`                   | `0.0.0.0`                        |
    /// | `PORT`                   | `8081`                           |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                             |
    /// | `DIRECTORY_BASE_URL`     | `http://localhost:8082/api/auth` |
    /// | `NOTIFICATIONS_BASE_URL` | `http://localhost:8083/api`      |
    /// | `DISPATCH_TIMEOUT_SECS`  | `5`                              |
    /// | `FANOUT_CONCURRENCY`     | `8`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = NotificationConfig::default();

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", "u16", 8081)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64", 30)?;
        let shutdown_timeout_secs = parse_var(&lookup, "SHUTDOWN_TIMEOUT_SECS", "u64", 30)?;

        let dispatch_timeout_secs = parse_var(
            &lookup,
            "DISPATCH_TIMEOUT_SECS",
            "u64",
            defaults.dispatch_timeout.as_secs(),
        )?;
        let fanout_concurrency = parse_var(
            &lookup,
            "FANOUT_CONCURRENCY",
            "usize",
            defaults.fanout_concurrency,
        )?;

        let notifications = NotificationConfig {
            directory_base_url: lookup("DIRECTORY_BASE_URL")
                .unwrap_or(defaults.directory_base_url),
            sink_base_url: lookup("NOTIFICATIONS_BASE_URL").unwrap_or(defaults.sink_base_url),
            dispatch_timeout: Duration::from_secs(dispatch_timeout_secs.max(1)),
            fanout_concurrency: fanout_concurrency.max(1),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            notifications,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
