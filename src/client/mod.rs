// Translation service client module
// Author: kelexine (https://github.com/kelexine)

mod translator;

pub use translator::TranslationClient;

use crate::cache;
use crate::config::AppConfig;

/// Header carrying the provider override.
pub const PROVIDER_HEADER: &str = "X-Provider";
/// Header carrying the provider API key.
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Header carrying the model override.
pub const MODEL_HEADER: &str = "X-Model";

/// Resolved parameters of one translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub api_url: String,
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl RequestParams {
    /// Parameters for the given endpoint with no provider overrides.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            provider: None,
            api_key: None,
            model: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_url: config.api.url.clone(),
            provider: config.provider.name.clone(),
            api_key: config.provider.api_key.clone(),
            model: config.provider.model.clone(),
        }
    }

    /// Cache key for `query` sent with these parameters (the API key is ignored).
    pub fn fingerprint(&self, query: &str) -> String {
        cache::fingerprint(
            query,
            &self.api_url,
            self.provider.as_deref(),
            self.model.as_deref(),
        )
    }
}
