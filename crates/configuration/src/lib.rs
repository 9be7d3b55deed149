use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    DatabaseSettings, LoggingSettings, ServerSettings, Settings, StoreBackend, StoreSettings,
};

/// Prefix for environment overrides, e.g. `SAFEGUARDING__SERVER__PORT=8081`.
pub const ENV_PREFIX: &str = "SAFEGUARDING";

/// Loads the application settings.
///
/// Sources, lowest priority first: built-in defaults, the TOML file at `path`
/// (or an optional `config.toml` in the working directory), then
/// `SAFEGUARDING__*` environment variables. A `.env` file is loaded first so
/// its variables take part.
///
/// The result is not validated, so callers can apply command-line overrides
/// first and then call [`Settings::validate`].
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let mut settings = build_settings(builder)?;
    if settings.database.url.is_none() {
        settings.database.url = std::env::var("DATABASE_URL").ok();
    }
    Ok(settings)
}

/// Deserializes whatever sources `builder` carries into `Settings`.
fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    Ok(settings)
}

impl Settings {
    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must not be 0".to_string()));
        }
        if self.server.socket_addr().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "server.host '{}' is not a valid IP address",
                self.server.host
            )));
        }
        if self.store.backend == StoreBackend::Postgres {
            if self.database.max_connections == 0 {
                return Err(ConfigError::ValidationError(
                    "database.max_connections must be at least 1".to_string(),
                ));
            }
            if self.database.url.as_deref().is_none_or(|url| url.trim().is_empty()) {
                return Err(ConfigError::ValidationError(
                    "database.url (or DATABASE_URL) is required for the postgres store".to_string(),
                ));
            }
        }
        Ok(())
    }
}
