use crate::error::ConfigError;
use crate::settings::RawSettings;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings};

/// Loads the application settings.
///
/// A local `.env` file is read first (if present) so its values show up as
/// ordinary environment variables. Sources are then layered from lowest to
/// highest priority: built-in defaults, an optional `config.toml` in the
/// working directory, and the process environment (`PORT`, `DEBUG`,
/// `DB_HOST`, ...). Empty environment values are ignored.
pub fn load_settings() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    build_settings(config::Environment::default())
}

fn build_settings(environment: config::Environment) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();
    for (key, value) in settings::defaults() {
        builder = builder.set_default(key, value)?;
    }

    let raw = builder
        .add_source(config::File::with_name("config").required(false))
        .add_source(environment.ignore_empty(true))
        .build()?
        .try_deserialize::<RawSettings>()?;

    Settings::try_from(raw)
}
