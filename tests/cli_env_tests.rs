// Precedence of flags, XAW_* environment variables and config.toml
// Author: kelexine (https://github.com/kelexine)
//
// Kept to a single test: the process environment is shared by every test in
// this binary.

use clap::Parser;
use clixaw::cli::Args;
use clixaw::config::{AppConfig, FileConfig, DEFAULT_API_URL};
use std::env;

fn file_config(contents: &str) -> FileConfig {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    FileConfig::load(&path).unwrap()
}

#[test]
fn test_flags_beat_env_beat_file() {
    let file = file_config(
        r#"
[provider]
model = "from-file"
name = "from-file"
"#,
    );

    // Environment only: env beats the file
    env::set_var("XAW_MODEL", "from-env");
    let args = Args::try_parse_from(["xaw", "q"]).unwrap();
    let config = AppConfig::resolve(&file, &args.overrides());
    assert_eq!(config.provider.model.as_deref(), Some("from-env"));
    assert_eq!(config.provider.name.as_deref(), Some("from-file"));

    // Flag and environment: the flag wins
    let args = Args::try_parse_from(["xaw", "--model", "from-flag", "q"]).unwrap();
    let config = AppConfig::resolve(&file, &args.overrides());
    assert_eq!(config.provider.model.as_deref(), Some("from-flag"));
    env::remove_var("XAW_MODEL");

    // Neither: the file value stands
    let args = Args::try_parse_from(["xaw", "q"]).unwrap();
    let config = AppConfig::resolve(&file, &args.overrides());
    assert_eq!(config.provider.model.as_deref(), Some("from-file"));

    // Empty environment values are unset, not blank overrides
    env::set_var("XAW_API_URL", "");
    env::set_var("XAW_PROVIDER", "");
    let args = Args::try_parse_from(["xaw", "q"]).unwrap();
    let overrides = args.overrides();
    assert!(overrides.api_url.is_none());
    assert!(overrides.provider.is_none());

    let config = AppConfig::resolve(&file, &overrides);
    assert_eq!(config.api.url, DEFAULT_API_URL);
    assert_eq!(config.provider.name.as_deref(), Some("from-file"));
    env::remove_var("XAW_API_URL");
    env::remove_var("XAW_PROVIDER");
}
