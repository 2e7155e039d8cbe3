//! Configuration data structures for clixaw.
//!
//! Two shapes live here: [`FileConfig`] mirrors `config.toml` as written by the
//! user (including the legacy root-level keys), and [`AppConfig`] is the fully
//! resolved, read-only configuration the rest of the program consumes.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::cache::CacheConfig;
use serde::Deserialize;

/// Default translation service endpoint.
pub const DEFAULT_API_URL: &str = "https://cmd.xaw.me";

/// The resolved configuration object for one invocation.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Response cache settings.
    pub cache: CacheConfig,

    /// Provider overrides forwarded to the translation service.
    pub provider: ProviderConfig,

    /// Translation service settings.
    pub api: ApiConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Provider overrides. All fields are optional; the service picks its own
/// defaults for anything left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, e.g. `openai` or `gemini`.
    #[serde(default)]
    pub name: Option<String>,

    /// API key for the provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model override, e.g. `gpt-4`.
    #[serde(default)]
    pub model: Option<String>,
}

/// Settings for the translation service connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the translation service.
    /// Default: `https://cmd.xaw.me`
    pub url: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `warn`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`compact`, `pretty`, `json`).
    /// Default: `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Values that outrank the config file: CLI flags, or the `XAW_*`
/// environment variables when the flag is absent.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// `config.toml` exactly as the user wrote it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub provider: Option<ProviderSection>,

    #[serde(default)]
    pub api: Option<ApiSection>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Legacy root-level keys, consulted only when the matching section is absent.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

/// The `provider` key is either a `[provider]` table or a legacy root-level
/// provider name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProviderSection {
    Table(ProviderConfig),
    Name(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    #[serde(default)]
    pub url: Option<String>,
}

impl FileConfig {
    /// Provider settings from the `[provider]` table, or from the legacy
    /// root-level keys when there is no table.
    pub fn provider_config(&self) -> ProviderConfig {
        match &self.provider {
            Some(ProviderSection::Table(table)) => table.clone(),
            Some(ProviderSection::Name(name)) => ProviderConfig {
                name: Some(name.clone()),
                api_key: self.api_key.clone(),
                model: self.model.clone(),
            },
            None => ProviderConfig {
                name: None,
                api_key: self.api_key.clone(),
                model: self.model.clone(),
            },
        }
    }

    /// API URL from the `[api]` table, or the legacy root-level `api_url`.
    pub fn api_url(&self) -> Option<String> {
        match &self.api {
            Some(section) => section.url.clone(),
            None => self.api_url.clone(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
