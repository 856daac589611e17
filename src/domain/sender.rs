//! src/domain/sender.rs
use crate::configuration::{ConfigurationError, ProviderConfig};
use crate::host::HostConfiguration;
use serde::Serialize;

/// Display name used whenever neither the host nor the module settings
/// provide one.
pub const FALLBACK_SENDER_NAME: &str = "WHMCS System";

/// The "From" identity of a single send or test. Derived for every call,
/// settings may change in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSender {
    pub email: String,
    pub name: String,
}

#[tracing::instrument(name = "Resolve sender identity", skip(config, host), fields(use_host_defaults = config.use_host_defaults))]
pub fn resolve_sender(
    config: &ProviderConfig,
    host: &dyn HostConfiguration,
) -> Result<ResolvedSender, ConfigurationError> {
    let (email, name) = if config.use_host_defaults {
        let defaults = host.default_sender();
        if defaults.email.is_empty() {
            return Err(ConfigurationError::MissingHostEmail);
        }
        (defaults.email, defaults.company_name)
    } else {
        let email = config.from_email.clone().unwrap_or_default();
        if email.is_empty() {
            return Err(ConfigurationError::MissingSenderEmail);
        }
        (email, config.from_name.clone().unwrap_or_default())
    };

    let name = if name.is_empty() {
        FALLBACK_SENDER_NAME.to_string()
    } else {
        name
    };

    Ok(ResolvedSender { email, name })
}
