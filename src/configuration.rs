//! src/configuration.rs
use config::Config;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";
pub const DEFAULT_TIMEOUT_MILLISECONDS: u64 = 10_000;

/// Settings exactly as the host stores them: every value is a string.
pub type HostSettings = HashMap<String, String>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("The Brevo API key is missing")]
    MissingApiKey,
    #[error("The host has no default sender email configured")]
    MissingHostEmail,
    #[error("A sender email is required when the host defaults are not used")]
    MissingSenderEmail,
    #[error("There is no signed-in operator to receive the test email")]
    MissingOperator,
    #[error("Invalid module settings: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Deserialize, Clone, Debug)]
pub struct ProviderConfig {
    pub api_key: Secret<String>,
    pub use_host_defaults: bool,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub api_url: String,
    pub timeout_milliseconds: u64,
}

impl ProviderConfig {
    pub fn from_host_settings(settings: &HostSettings) -> Result<Self, ConfigurationError> {
        let mut builder = Config::builder()
            .set_default("use_host_defaults", true)?
            .set_default("api_url", BREVO_API_URL)?
            .set_default("timeout_milliseconds", DEFAULT_TIMEOUT_MILLISECONDS as i64)?;

        for (key, value) in settings {
            builder = match key.as_str() {
                "use_host_defaults" => builder.set_override(key.as_str(), is_checked(value))?,
                // Blank optional fields keep their defaults.
                "api_url" | "timeout_milliseconds" if value.trim().is_empty() => builder,
                _ => builder.set_override(key.as_str(), value.as_str())?,
            };
        }

        let config: ProviderConfig = builder.build()?.try_deserialize()?;

        if config.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Checkbox values as the host submits them. Unchecked boxes arrive empty.
fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "yes" | "true" | "1"
    )
}
