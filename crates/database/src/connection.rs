use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is sized and aged according to `settings`; connections are
/// opened lazily up to `max_connections`, and the first one is opened here so
/// that bad credentials or an unreachable host fail at startup.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let options = connect_options(settings)?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .max_lifetime(settings.max_lifetime)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "Connected to PostgreSQL database"
    );

    Ok(pool)
}

/// Translates the settings into driver connect options.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, DbError> {
    let ssl_mode = PgSslMode::from_str(&settings.ssl_mode).map_err(|_e| {
        DbError::ConnectionConfigError(format!("unsupported ssl mode '{}'", settings.ssl_mode))
    })?;

    Ok(PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
        .ssl_mode(ssl_mode))
}
