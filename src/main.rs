// clixaw - natural language to shell command translator
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use clixaw::cli::{dispatch, App, Args};
use clixaw::config::{self, AppConfig, FileConfig};
use clixaw::gate::TerminalPrompt;
use clixaw::utils::{clipboard, logging};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Detached clipboard helper spawned by --copy
    if let Some(code) = clipboard::serve_from_env() {
        std::process::exit(code);
    }

    // Parse CLI arguments (flags already merged with XAW_* env vars)
    let args = Args::parse();
    let overrides = args.overrides();

    // Phase 1: Load configuration, falling back to defaults if config.toml is malformed
    let config_dir = config::config_dir()?;
    let config_path = config::config_path(&config_dir);
    let (config, load_error) = match AppConfig::load(&config_path, &overrides) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::resolve(&FileConfig::default(), &overrides), Some(e)),
    };

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    if let Some(e) = load_error {
        warn!("Ignoring malformed config file {}: {}", config_path.display(), e);
    }
    debug!("clixaw v{} using {}", env!("CARGO_PKG_VERSION"), config_dir.display());
    debug!("Translation service: {}", config.api.url);

    // Phase 3: Build stores and client, then run the command
    let app = App::new(&config, &config_dir)?;
    let exit_code = dispatch(args, &app, &mut TerminalPrompt).await;

    std::process::exit(exit_code);
}
