//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod delivery;
pub mod email;
pub mod logging;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::delivery::DeliveryConfig;
pub use self::email::EmailConfig;
pub use self::logging::LoggingConfig;
pub use self::server::{CorsConfig, ServerConfig};
pub use self::sms::SmsConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// SQLite database settings.
    pub database: DatabaseConfig,
    /// Retry and timeout settings for delivery.
    pub delivery: DeliveryConfig,
    /// SMTP credentials for the email sender.
    pub email: EmailConfig,
    /// Optional SMS provider credentials. `None` disables SMS delivery.
    #[serde(default)]
    pub sms: Option<SmsConfig>,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `COURIER__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("COURIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    fn validate(&self) -> Result<(), AppError> {
        if self.server.auth_token.trim().is_empty() {
            return Err(AppError::configuration("server.auth_token must be set"));
        }
        if self.delivery.max_retries == 0 {
            return Err(AppError::configuration("delivery.max_retries must be positive"));
        }
        if self.delivery.retry_interval_sec == 0 {
            return Err(AppError::configuration(
                "delivery.retry_interval_sec must be positive",
            ));
        }
        if let Some(sms) = &self.sms {
            if !sms.is_complete() {
                return Err(AppError::configuration(
                    "sms section requires account_sid, auth_token, and from_number",
                ));
            }
        }
        Ok(())
    }

    /// Whether SMS delivery is configured for this deployment.
    pub fn sms_configured(&self) -> bool {
        self.sms.as_ref().is_some_and(SmsConfig::is_complete)
    }
}
