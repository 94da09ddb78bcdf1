use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// TLS modes understood by the Postgres driver.
pub const SSL_MODES: [&str; 6] = ["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// HTTP listener and request lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
    /// Deadline applied to every store operation made on behalf of a request.
    pub request_timeout: Duration,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_timeout: Duration,
}

/// Connection and pool settings for PostgreSQL.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// One of [`SSL_MODES`].
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

// Hand-written so the password never ends up in a log line.
impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("max_lifetime", &self.max_lifetime)
            .field("idle_timeout", &self.idle_timeout)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Lowers the default log level from `info` to `debug`.
    pub debug: bool,
}

impl LoggingSettings {
    pub fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// The flat key space as it appears in the environment (`PORT`, `DB_HOST`, ...)
/// and in `config.toml`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSettings {
    port: u16,
    debug: bool,
    db_host: String,
    db_user: String,
    db_password: String,
    db_name: String,
    db_port: u16,
    db_ssl_mode: String,
    db_max_connections: u32,
    db_min_connections: u32,
    db_max_lifetime_secs: u64,
    db_idle_timeout_secs: u64,
    db_acquire_timeout_secs: u64,
    request_timeout_secs: u64,
    shutdown_timeout_secs: u64,
}

/// Default values for every key in [`RawSettings`].
pub(crate) fn defaults() -> Vec<(&'static str, config::Value)> {
    vec![
        ("port", 4260_i64.into()),
        ("debug", false.into()),
        ("db_host", "localhost".into()),
        ("db_user", "postgres".into()),
        ("db_password", "".into()),
        ("db_name", "postgres".into()),
        ("db_port", 5432_i64.into()),
        ("db_ssl_mode", "disable".into()),
        ("db_max_connections", 25_i64.into()),
        ("db_min_connections", 5_i64.into()),
        ("db_max_lifetime_secs", 3600_i64.into()),
        ("db_idle_timeout_secs", 1800_i64.into()),
        ("db_acquire_timeout_secs", 5_i64.into()),
        ("request_timeout_secs", 15_i64.into()),
        ("shutdown_timeout_secs", 10_i64.into()),
    ]
}

impl TryFrom<RawSettings> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let ssl_mode = raw.db_ssl_mode.to_ascii_lowercase();
        if !SSL_MODES.contains(&ssl_mode.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "DB_SSL_MODE must be one of {}, got '{}'",
                SSL_MODES.join(", "),
                raw.db_ssl_mode
            )));
        }
        if raw.db_max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        if raw.db_min_connections > raw.db_max_connections {
            return Err(ConfigError::ValidationError(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                raw.db_min_connections, raw.db_max_connections
            )));
        }
        if raw.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        Ok(Settings {
            server: ServerSettings {
                port: raw.port,
                request_timeout: Duration::from_secs(raw.request_timeout_secs),
                shutdown_timeout: Duration::from_secs(raw.shutdown_timeout_secs),
            },
            database: DatabaseSettings {
                host: raw.db_host,
                port: raw.db_port,
                user: raw.db_user,
                password: raw.db_password,
                name: raw.db_name,
                ssl_mode,
                max_connections: raw.db_max_connections,
                min_connections: raw.db_min_connections,
                max_lifetime: Duration::from_secs(raw.db_max_lifetime_secs),
                idle_timeout: Duration::from_secs(raw.db_idle_timeout_secs),
                acquire_timeout: Duration::from_secs(raw.db_acquire_timeout_secs),
            },
            logging: LoggingSettings { debug: raw.debug },
        })
    }
}
