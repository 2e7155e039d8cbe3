// Command handlers - translate flow and history/cache subcommands
// Author: kelexine (https://github.com/kelexine)

use super::{Args, Commands};
use crate::cache::CacheStore;
use crate::client::{RequestParams, TranslationClient};
use crate::config::AppConfig;
use crate::error::{Result, XawError};
use crate::gate::{self, Confirm};
use crate::history::{HistoryEntry, HistoryLog};
use crate::utils::{clipboard, timestamp};
use clap::CommandFactory;
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::{debug, info};

/// Options of the root (translate) invocation.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub execute: bool,
    pub confirm: bool,
    pub copy: bool,
    pub use_cache: bool,
}

impl From<&Args> for TranslateOptions {
    fn from(args: &Args) -> Self {
        Self {
            execute: args.execute,
            confirm: !args.no_confirm,
            copy: args.copy,
            use_cache: !args.no_cache,
        }
    }
}

/// Everything one invocation works with: resolved settings, the two stores
/// and the service client.
pub struct App {
    params: RequestParams,
    cache: CacheStore,
    history: HistoryLog,
    client: TranslationClient,
}

impl App {
    /// Builds the stores under `data_dir` from the resolved configuration.
    pub fn new(config: &AppConfig, data_dir: &Path) -> Result<Self> {
        Ok(Self::with_client(config, data_dir, TranslationClient::new()?))
    }

    pub fn with_client(config: &AppConfig, data_dir: &Path, client: TranslationClient) -> Self {
        Self {
            params: RequestParams::from_config(config),
            cache: CacheStore::new(data_dir, config.cache.clone()),
            history: HistoryLog::new(data_dir),
            client,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Resolve a query to a command, from the cache when possible.
    pub async fn resolve_command(&self, query: &str, use_cache: bool) -> Result<String> {
        if use_cache {
            if let Some(command) = self.cache.lookup(query, &self.params) {
                info!("Serving command from cache");
                return Ok(command);
            }
        }

        let command = self.client.translate(query, &self.params).await?;

        if use_cache {
            self.cache.store(query, &command, &self.params);
        }

        Ok(command)
    }

    /// The root invocation: translate, then print or execute. Returns the exit status.
    pub async fn translate(
        &self,
        query: &str,
        options: &TranslateOptions,
        prompt: &mut dyn Confirm,
    ) -> Result<i32> {
        if query.trim().is_empty() {
            return Err(XawError::EmptyQuery);
        }

        let command = self.resolve_command(query, options.use_cache).await?;

        if options.copy {
            match clipboard::copy(&command) {
                Ok(()) => println!("{}", "✓ Command copied to clipboard".green()),
                Err(e) => eprintln!(
                    "{}",
                    format!("Warning: Could not copy to clipboard: {}", e).yellow()
                ),
            }
        }

        if options.execute {
            let outcome = gate::execute(&command, options.confirm, prompt).await;
            let exit_code = outcome.exit_code();
            self.history.append(query, &command, true, Some(exit_code));
            return Ok(exit_code);
        }

        println!("{}", command);
        self.history.append(query, &command, false, None);
        Ok(0)
    }

    pub fn show_history(&self, limit: Option<usize>) {
        let entries = self.history.list(limit);

        if entries.is_empty() {
            println!("No command history found.");
            return;
        }

        for (idx, entry) in entries.iter().enumerate() {
            println!("\n[{}] {}{}", idx, timestamp::display(&entry.timestamp), status_label(entry));
            println!("  Query: {}", entry.query);
            println!("  Command: {}", entry.command);
        }
    }

    /// Re-show or re-run a history entry. Re-runs are logged as `[repeat] <query>`.
    pub async fn repeat(
        &self,
        index: usize,
        execute: bool,
        confirm: bool,
        prompt: &mut dyn Confirm,
    ) -> Result<i32> {
        let entry = self.history.get(index).ok_or(XawError::HistoryIndex(index))?;

        if entry.command.is_empty() {
            return Err(XawError::EmptyHistoryEntry);
        }

        println!("{}", format!("Repeating: {}", entry.query).cyan());
        println!("Command: {}", entry.command);

        if !execute {
            println!("{}", entry.command);
            return Ok(0);
        }

        let outcome = gate::execute(&entry.command, confirm, prompt).await;
        let exit_code = outcome.exit_code();
        self.history.append(
            &format!("[repeat] {}", entry.query),
            &entry.command,
            true,
            Some(exit_code),
        );
        Ok(exit_code)
    }

    /// Returns the exit status: 1 if the user declined.
    pub fn clear_history(&self, skip_prompt: bool, prompt: &mut dyn Confirm) -> i32 {
        if !skip_prompt && !prompt.confirm("Are you sure you want to clear all command history?") {
            eprintln!("Aborted!");
            return 1;
        }
        self.history.clear();
        println!("{}", "✓ Command history cleared".green());
        0
    }

    /// Returns the exit status: 1 if the user declined.
    pub fn clear_cache(&self, skip_prompt: bool, prompt: &mut dyn Confirm) -> i32 {
        if !skip_prompt && !prompt.confirm("Are you sure you want to clear all cached API responses?") {
            eprintln!("Aborted!");
            return 1;
        }
        self.cache.clear();
        println!("{}", "✓ Cache cleared".green());
        0
    }

    pub fn show_cache_stats(&self) {
        let stats = self.cache.stats();

        println!("Cache Statistics:");
        println!("  Size: {} entries", stats.size);
        if let Some(oldest) = &stats.oldest_entry {
            println!("  Oldest entry: {}", timestamp::display(oldest));
        }
        if let Some(newest) = &stats.newest_entry {
            println!("  Newest entry: {}", timestamp::display(newest));
        }
        if stats.size == 0 {
            println!("{}", "  Cache is empty".yellow());
        }
        if !self.cache.is_enabled() {
            println!("{}", "  Caching is disabled in config.toml".yellow());
        }
    }
}

/// Run the parsed command line and return the process exit status.
pub async fn dispatch(args: Args, app: &App, prompt: &mut dyn Confirm) -> i32 {
    let result = match &args.command {
        Some(Commands::History { limit, all }) => {
            app.show_history(if *all { None } else { Some(*limit) });
            Ok(0)
        }
        Some(Commands::Repeat { index, execute, no_confirm }) => {
            app.repeat(*index, *execute, !*no_confirm, prompt).await
        }
        Some(Commands::ClearHistory { yes }) => Ok(app.clear_history(*yes, prompt)),
        Some(Commands::ClearCache { yes }) => Ok(app.clear_cache(*yes, prompt)),
        Some(Commands::CacheStats) => {
            app.show_cache_stats();
            Ok(0)
        }
        None if args.query.is_empty() => {
            if let Err(e) = Args::command().print_help() {
                debug!("Failed to print help: {}", e);
            }
            Ok(0)
        }
        None => {
            let options = TranslateOptions::from(&args);
            app.translate(&args.query_string(), &options, prompt).await
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            1
        }
    }
}

/// Status suffix shown next to a history entry.
fn status_label(entry: &HistoryEntry) -> String {
    match (entry.executed, entry.exit_code) {
        (true, Some(0)) => format!(" {}", "✓".green()),
        (true, code) => {
            let code = code.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string());
            format!(" {}", format!("✗ (exit {})", code).red())
        }
        (false, _) => format!(" {}", "(not executed)".yellow()),
    }
}
