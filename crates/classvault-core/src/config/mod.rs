//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod browser;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::browser::BrowserConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay + `CLASSVAULT__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote tree service settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Identity the browser acts with.
    #[serde(default)]
    pub session: SessionConfig,
    /// Browser behaviour settings.
    #[serde(default)]
    pub browser: BrowserConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with `CLASSVAULT`
    /// (`CLASSVAULT__API__BASE_URL=...`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CLASSVAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration("api.timeout_seconds must be positive"));
        }
        if self.browser.recent_limit == 0 {
            return Err(AppError::configuration("browser.recent_limit must be positive"));
        }
        Ok(())
    }
}
