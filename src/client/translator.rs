// Translation service HTTP client with URL-style fallback
// Author: kelexine (https://github.com/kelexine)

use super::{RequestParams, API_KEY_HEADER, MODEL_HEADER, PROVIDER_HEADER};
use crate::error::{XawError, Result};
use crate::utils::logging::mask_secret;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default request timeout for the translation service.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the natural-language-to-shell translation service.
///
/// The service takes the query either as `?q=` parameter or as the URL path
/// and answers with the command as plain text. The query-parameter form is
/// tried first; if the request fails, the path form is tried once.
pub struct TranslationClient {
    http_client: Client,
}

impl TranslationClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("clixaw/", env!("CARGO_PKG_VERSION")))
            .use_rustls_tls()
            .build()
            .map_err(|e| XawError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Translate a natural language query into a shell command.
    ///
    /// If both URL styles fail, the error of the first attempt is returned.
    /// An empty answer is reported as [`XawError::EmptyResponse`] without
    /// trying the second style.
    pub async fn translate(&self, query: &str, params: &RequestParams) -> Result<String> {
        let base_url = params.api_url.trim_end_matches('/');
        let encoded_query = urlencoding::encode(query);

        if let Some(key) = &params.api_key {
            debug!("Using API key {}", mask_secret(key));
        }

        let query_url = format!("{}/?q={}", base_url, encoded_query);
        let first_error = match self.fetch(&query_url, params).await {
            Ok(body) => return Self::extract_command(&body),
            Err(e) => e,
        };

        debug!("Query-style request failed ({}), retrying path-style", first_error);

        let path_url = format!("{}/{}", base_url, encoded_query);
        match self.fetch(&path_url, params).await {
            Ok(body) => Self::extract_command(&body),
            Err(e) => {
                debug!("Path-style request failed: {}", e);
                Err(first_error)
            }
        }
    }

    async fn fetch(&self, url: &str, params: &RequestParams) -> Result<String> {
        debug!("GET {}", url);

        let mut request = self.http_client.get(url);
        if let Some(provider) = &params.provider {
            request = request.header(PROVIDER_HEADER, provider);
        }
        if let Some(api_key) = &params.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        if let Some(model) = &params.model {
            request = request.header(MODEL_HEADER, model);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(XawError::Api(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn extract_command(body: &str) -> Result<String> {
        let command = body.trim();
        if command.is_empty() {
            return Err(XawError::EmptyResponse);
        }
        Ok(command.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command_trims() {
        assert_eq!(
            TranslationClient::extract_command("  ls -la\n").unwrap(),
            "ls -la"
        );
    }

    #[test]
    fn test_extract_command_rejects_blank() {
        assert!(matches!(
            TranslationClient::extract_command(" \n\t"),
            Err(XawError::EmptyResponse)
        ));
    }
}
