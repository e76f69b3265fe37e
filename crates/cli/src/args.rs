//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main`).

use clap::{Parser, Subcommand};
use selchord_config::{ActionId, Variant};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "selchord")]
#[command(
    about = "Double-press a key over selected text to translate, search or rewrite it",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  selchord run --selection 'ログが表示されない'\n  selchord --variant hosted bindings\n  selchord replay session.json --echo\n  selchord ask docs-search 'APM traces missing for Node.js'\n  selchord ticket-summary ticket.json\n"
)]
pub struct Cli {
    /// Profile name to load from the config file
    #[arg(long, global = true, env = "SELCHORD_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, global = true, env = "SELCHORD_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Deployment variant (general or hosted)
    #[arg(long, global = true)]
    pub variant: Option<Variant>,

    /// Chord window in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub window_ms: Option<u64>,

    /// Chat-completion model
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Directory for log files written while the terminal is in raw mode
    #[arg(long, global = true, env = "SELCHORD_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// OTLP endpoint for trace export (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "SELCHORD_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Bind address for the Prometheus metrics endpoint (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, env = "SELCHORD_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Listen for chords on this terminal
    Run {
        /// Text to treat as the selection (defaults to the system clipboard)
        #[arg(long)]
        selection: Option<String>,
    },

    /// Replay a scripted session of key presses, selection changes and navigations
    Replay {
        /// JSON script to replay
        script: PathBuf,

        /// Use built-in echo handlers instead of calling the API
        #[arg(long)]
        echo: bool,
    },

    /// Run one action directly on the given text
    Ask {
        /// Action identifier (e.g., translate, docs-search)
        action: ActionId,

        /// Text to process
        text: String,

        /// Do not open browsers or touch the clipboard; print the result only
        #[arg(long)]
        print_only: bool,
    },

    /// Print the effective chord bindings
    Bindings {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format a ticket summary from a JSON file and copy it
    TicketSummary {
        /// JSON file with ticket fields
        file: PathBuf,

        /// Print the summary without copying it
        #[arg(long)]
        no_copy: bool,
    },
}

impl Commands {
    /// Whether this command owns the terminal in raw mode.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Run { .. })
    }

    /// Whether this command needs API settings at all.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::TicketSummary { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "selchord",
            "bindings",
            "--variant",
            "hosted",
            "--window-ms",
            "300",
        ])
        .unwrap();
        assert_eq!(cli.variant, Some(Variant::Hosted));
        assert_eq!(cli.window_ms, Some(300));
        assert!(matches!(cli.command, Commands::Bindings { json: false }));
    }

    #[test]
    fn test_ask_parses_action() {
        let cli = Cli::try_parse_from(["selchord", "ask", "docs_search", "APM traces"]).unwrap();
        match cli.command {
            Commands::Ask { action, text, .. } => {
                assert_eq!(action, ActionId::DocsSearch);
                assert_eq!(text, "APM traces");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(Cli::try_parse_from(["selchord", "ask", "summon-dragons", "x"]).is_err());
    }

    #[test]
    fn test_run_is_interactive() {
        let cli = Cli::try_parse_from(["selchord", "run"]).unwrap();
        assert!(cli.command.is_interactive());
        assert!(cli.command.needs_config());
    }
}
