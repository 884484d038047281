use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::store_client::{StoreClient, StoreClientError};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub store: StoreSettings,
    pub store_client: StoreClientSettings,
    #[serde(default)]
    pub wizard: WizardSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub base_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreSettings {
    pub data_path: PathBuf,
    /// Catalog a posted reason lands in when the request omits
    /// `addToSignatureReasons`.
    #[serde(default)]
    pub add_to_signature_reasons_by_default: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreClientSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl StoreClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<StoreClient, StoreClientError> {
        StoreClient::parse(&self.base_url, self.timeout())
    }
}

/// Behaviour switches of the recipient wizard.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct WizardSettings {
    /// Grapheme cap for a custom reason typed after picking "Other".
    /// `None` leaves the text unbounded.
    pub custom_reason_max_length: Option<usize>,
    /// Flush pending reasons to the store before validating emails.
    pub persist_reasons_before_validation: bool,
    /// Only drop an other-reason locally once the store acknowledged it.
    pub confirm_reason_deletion: bool,
    /// Sent as `addToSignatureReasons` when flushing pending reasons.
    pub add_reasons_to_signature_catalog: bool,
    pub toast_duration_milliseconds: u64,
}

impl WizardSettings {
    /// Saturates at the longest representable duration.
    pub fn toast_duration(&self) -> chrono::Duration {
        chrono::Duration::from_std(Duration::from_millis(self.toast_duration_milliseconds))
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            custom_reason_max_length: Some(50),
            persist_reasons_before_validation: false,
            confirm_reason_deletion: true,
            add_reasons_to_signature_catalog: false,
            toast_duration_milliseconds: 3000,
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment, default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
