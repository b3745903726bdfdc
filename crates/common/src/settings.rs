use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auction::types::GlobalConfig;
use crate::error::AdapterError;
use crate::integrations::inmar::InmarConfig;

pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "INMAR_ADAPTER";
pub const ENVIRONMENT_VARIABLE_SEPARATOR: &str = "__";

/// Host currency settings (`currency.*`).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CurrencyConfig {
    /// Currency the host ad server reports in (`currency.adServerCurrency`)
    #[serde(default)]
    pub ad_server_currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct Settings {
    /// Whether the page is subject to COPPA
    #[serde(default)]
    pub coppa: Option<bool>,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    #[validate(nested)]
    pub inmar: InmarConfig,
}

impl Settings {
    /// Load the settings bundled with the crate, with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundled TOML, combined with any
    /// `INMAR_ADAPTER__*` variables, fails to parse or validate.
    pub fn new() -> Result<Self, Report<AdapterError>> {
        let toml_str = include_str!("../../../inmar-adapter.toml");

        Self::from_toml(toml_str)
    }

    /// Parse settings from a TOML string layered with `INMAR_ADAPTER__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TOML is malformed, a value has the
    /// wrong type, or validation fails (e.g. an endpoint is not a URL).
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AdapterError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_VARIABLE_PREFIX)
            .separator(ENVIRONMENT_VARIABLE_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AdapterError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(AdapterError::Configuration {
                    message: "Failed to deserialize configuration".to_string(),
                })?;

        settings
            .validate()
            .change_context(AdapterError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }

    /// Host-global values forwarded by the request builder.
    #[must_use]
    pub fn global_config(&self) -> GlobalConfig {
        GlobalConfig {
            ad_server_currency: self.currency.ad_server_currency.clone(),
            coppa: self.coppa,
        }
    }
}
