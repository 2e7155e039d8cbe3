// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{XawError, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};

/// Name of the per-user directory holding the config, cache and history files.
const APP_DIR: &str = "clixaw";

/// Returns `$XDG_CONFIG_HOME/clixaw`, falling back to `~/.config/clixaw`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(config_home).join(APP_DIR));
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_DIR))
        .ok_or_else(|| XawError::Config("could not determine home directory".to_string()))
}

/// Path of `config.toml` inside the given config directory.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

impl FileConfig {
    /// Reads `config.toml`. A missing file yields the defaults; a malformed one
    /// is an error so the caller can report it before falling back.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. CLI arguments (highest)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// Flags and environment variables arrive pre-merged in `overrides`.
    pub fn load(path: &Path, overrides: &Overrides) -> Result<Self> {
        let file = FileConfig::load(path)?;
        Ok(Self::resolve(&file, overrides))
    }

    /// Applies `overrides` on top of the file settings and defaults.
    ///
    /// Empty strings count as unset at every layer.
    pub fn resolve(file: &FileConfig, overrides: &Overrides) -> Self {
        let file_provider = file.provider_config();

        let provider = ProviderConfig {
            name: non_empty(overrides.provider.clone()).or(non_empty(file_provider.name)),
            api_key: non_empty(overrides.api_key.clone()).or(non_empty(file_provider.api_key)),
            model: non_empty(overrides.model.clone()).or(non_empty(file_provider.model)),
        };

        let api = ApiConfig {
            url: non_empty(overrides.api_url.clone())
                .or_else(|| non_empty(file.api_url()))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };

        Self {
            cache: file.cache.clone(),
            provider,
            api,
            logging: file.logging.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = config_path(dir.path());
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&config_path(dir.path()), &Overrides::default()).unwrap();

        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.provider, ProviderConfig::default());
        assert_eq!(config.cache.ttl, 7 * 24 * 60 * 60);
        assert_eq!(config.cache.max_size, 1000);
        assert!(config.cache.enabled);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_sections_are_read() {
        let (_dir, path) = write_config(
            r#"
[cache]
ttl = 60
max_size = 5
enabled = false

[provider]
name = "openai"
api_key = "sk-test"
model = "gpt-4"

[api]
url = "http://localhost:9000"
"#,
        );

        let config = AppConfig::load(&path, &Overrides::default()).unwrap();
        assert_eq!(config.cache.ttl, 60);
        assert_eq!(config.cache.max_size, 5);
        assert!(!config.cache.enabled);
        assert_eq!(config.provider.name.as_deref(), Some("openai"));
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4"));
        assert_eq!(config.api.url, "http://localhost:9000");
    }

    #[test]
    fn test_legacy_root_keys() {
        let (_dir, path) = write_config(
            r#"
provider = "gemini"
api_key = "legacy-key"
model = "gemini-pro"
api_url = "http://legacy.example"
"#,
        );

        let config = AppConfig::load(&path, &Overrides::default()).unwrap();
        assert_eq!(config.provider.name.as_deref(), Some("gemini"));
        assert_eq!(config.provider.api_key.as_deref(), Some("legacy-key"));
        assert_eq!(config.provider.model.as_deref(), Some("gemini-pro"));
        assert_eq!(config.api.url, "http://legacy.example");
    }

    #[test]
    fn test_overrides_beat_file() {
        let (_dir, path) = write_config(
            r#"
[provider]
name = "openai"
model = "gpt-4"

[api]
url = "http://from-file"
"#,
        );

        let overrides = Overrides {
            api_url: Some("http://from-flag".to_string()),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };

        let config = AppConfig::load(&path, &overrides).unwrap();
        assert_eq!(config.api.url, "http://from-flag");
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4o"));
        // Untouched keys still come from the file
        assert_eq!(config.provider.name.as_deref(), Some("openai"));
    }

    #[test]
    fn test_empty_values_fall_through() {
        let (_dir, path) = write_config(
            r#"
[provider]
name = ""
model = "gpt-4"

[api]
url = ""
"#,
        );

        let overrides = Overrides {
            api_url: Some(String::new()),
            provider: Some(String::new()),
            model: Some(String::new()),
            api_key: None,
        };

        let config = AppConfig::load(&path, &overrides).unwrap();
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.provider.name, None);
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4"));
    }

    #[test]
    fn test_partial_cache_section_keeps_defaults() {
        let (_dir, path) = write_config("[cache]\nttl = 10\n");

        let config = AppConfig::load(&path, &Overrides::default()).unwrap();
        assert_eq!(config.cache.ttl, 10);
        assert_eq!(config.cache.max_size, 1000);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let (_dir, path) = write_config("[cache\nttl = ");
        assert!(AppConfig::load(&path, &Overrides::default()).is_err());
    }
}
