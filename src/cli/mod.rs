// CLI module for clixaw
// Author: kelexine (https://github.com/kelexine)

mod commands;

pub use commands::{dispatch, App, TranslateOptions};

use crate::config::Overrides;
use clap::{Parser, Subcommand};

const EXAMPLES: &str = "Examples:
  xaw show me big files
  xaw \"git push new branch\"
  xaw --execute list files in current directory";

/// Translate natural language queries to shell commands using the cmd.xaw.me API.
#[derive(Parser, Debug)]
#[command(
    name = "xaw",
    version,
    about,
    after_help = EXAMPLES,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    /// Natural language query describing the desired command
    pub query: Vec<String>,

    /// Execute the translated command instead of just printing it
    #[arg(short, long)]
    pub execute: bool,

    /// API URL (defaults to config file, then https://cmd.xaw.me)
    #[arg(long, env = "XAW_API_URL")]
    pub api_url: Option<String>,

    /// Provider name (e.g. openai, gemini)
    #[arg(long, env = "XAW_PROVIDER")]
    pub provider: Option<String>,

    /// API key for a custom provider
    #[arg(long, env = "XAW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model override (e.g. gemini-pro, gpt-4)
    #[arg(long, env = "XAW_MODEL")]
    pub model: Option<String>,

    /// Skip confirmation for dangerous commands (use with caution)
    #[arg(long)]
    pub no_confirm: bool,

    /// Copy the translated command to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Disable the cache for this request
    #[arg(long)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show command history
    History {
        /// Number of history entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Show all history entries
        #[arg(short, long)]
        all: bool,
    },

    /// Repeat a command from history by index (0 = most recent)
    Repeat {
        index: usize,

        /// Execute the command instead of just printing it
        #[arg(short, long)]
        execute: bool,

        /// Skip confirmation for dangerous commands (use with caution)
        #[arg(long)]
        no_confirm: bool,
    },

    /// Clear all command history
    ClearHistory {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Clear all cached API responses
    ClearCache {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show cache statistics
    CacheStats,
}

impl Args {
    /// Flag values (already merged with their `XAW_*` environment variables by
    /// clap). An empty value, e.g. `XAW_API_URL=`, is treated as absent.
    pub fn overrides(&self) -> Overrides {
        let set = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        Overrides {
            api_url: set(&self.api_url),
            provider: set(&self.provider),
            api_key: set(&self.api_key),
            model: set(&self.model),
        }
    }

    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_query_words_are_joined() {
        let args = Args::try_parse_from(["xaw", "-e", "list", "big", "files"]).unwrap();
        assert!(args.execute);
        assert!(args.command.is_none());
        assert_eq!(args.query_string(), "list big files");
    }

    #[test]
    fn test_subcommands_parse() {
        let args = Args::try_parse_from(["xaw", "history", "-n", "5"]).unwrap();
        assert!(matches!(args.command, Some(Commands::History { limit: 5, all: false })));

        let args = Args::try_parse_from(["xaw", "repeat", "2", "--execute"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Repeat { index: 2, execute: true, no_confirm: false })
        ));

        let args = Args::try_parse_from(["xaw", "cache-stats"]).unwrap();
        assert!(matches!(args.command, Some(Commands::CacheStats)));

        let args = Args::try_parse_from(["xaw", "clear-cache", "-y"]).unwrap();
        assert!(matches!(args.command, Some(Commands::ClearCache { yes: true })));
    }

    #[test]
    fn test_flag_overrides() {
        let args = Args::try_parse_from([
            "xaw",
            "--api-url",
            "http://localhost:1234",
            "--model",
            "gpt-4",
            "hello",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.api_url.as_deref(), Some("http://localhost:1234"));
        assert_eq!(overrides.model.as_deref(), Some("gpt-4"));
    }

    #[test]
    fn test_empty_flag_is_not_an_override() {
        let args = Args::try_parse_from(["xaw", "--provider", "", "hello"]).unwrap();
        assert!(args.overrides().provider.is_none());
    }
}
