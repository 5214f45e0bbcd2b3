use std::fmt::Display;
use std::time::Duration;

use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::content_client::ContentClient;
use crate::newsletter_client::NewsletterClient;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub newsletter: NewsletterSettings,
    pub content: ContentSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// `127.0.0.1` locally, `0.0.0.0` in production.
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

/// Brevo contact API.
#[derive(Deserialize, Clone)]
pub struct NewsletterSettings {
    pub endpoint: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub list_id: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_millis: u64,
}

impl NewsletterSettings {
    pub fn client(self) -> anyhow::Result<NewsletterClient> {
        NewsletterClient::new(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// Contentful delivery API.
#[derive(Deserialize, Clone)]
pub struct ContentSettings {
    pub endpoint: String,
    pub space_id: String,
    pub access_token: Secret<String>,
    pub environment: String,
    /// Content type id of blog entries. Fixed here rather than guessed.
    pub content_type: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_millis: u64,
    pub defaults: PostDefaults,
}

impl ContentSettings {
    pub fn client(self) -> anyhow::Result<ContentClient> {
        ContentClient::new(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// Values used when an entry leaves a field empty.
#[derive(Deserialize, Clone, Debug)]
pub struct PostDefaults {
    pub author: String,
    pub category: String,
    pub read_time: String,
    pub placeholder_image: String,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            author: "Lucy James Abaji".to_string(),
            category: "Leadership".to_string(),
            read_time: "5 min read".to_string(),
            placeholder_image: "/api/placeholder/600/400".to_string(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct TelemetrySettings {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Secret<String>,
}

#[derive(Debug, PartialEq, Eq)]
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

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

/// Layers `configuration/base.yaml`, the environment file picked by
/// `APP_ENVIRONMENT` and finally `APP_*` variables, e.g.
/// `APP_NEWSLETTER__API_KEY` -> `Settings.newsletter.api_key`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory. {e}")))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let environment_filename = format!("{environment}.yaml");

    let settings = Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
