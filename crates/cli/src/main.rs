//! selchord: double-press a key over selected text to run an action on it.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Set up logging, optional OTLP tracing and the Prometheus exporter.
//! - Load configuration and hand off to the command implementations.
//!
//! Does NOT handle:
//! - Chord detection (see `selchord-core`) or API calls (see `selchord-client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - While the terminal is in raw mode, logs go to a file, never to the terminal.

mod args;
mod commands;
mod config_context;
mod desktop;
mod dispatch;
mod error;
mod handlers;
mod host;
mod replay;
mod shutdown;
mod sinks;

use std::path::PathBuf;
use std::time::Duration;

use args::Cli;
use clap::Parser;
use config_context::ConfigCommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use selchord_client::metrics_exporter::MetricsExporter;
use selchord_client::tracing::TracingConfig;
use selchord_config::ConfigLoader;
use shutdown::{Shutdown, is_interrupted};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "selchord.log";

fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "selchord")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn load_config(cli: &Cli) -> anyhow::Result<selchord_config::Config> {
    let mut loader = ConfigLoader::new();

    // Blank values are ignored so the env var can still apply
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(ref profile_name) = cli.profile {
        loader = loader.with_profile_name(profile_name.clone());
    }

    // Env vars override profile values; CLI flags override both.
    loader = loader.from_profile()?.from_env()?;

    if let Some(variant) = cli.variant {
        loader = loader.with_variant(variant);
    }
    if let Some(ms) = cli.window_ms {
        loader = loader.with_window(Duration::from_millis(ms));
    }
    if let Some(ref model) = cli.model {
        loader = loader.with_model(model.clone());
    }

    Ok(loader.build()?)
}

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    let interactive = cli.command.is_interactive();

    // The appender guard must live for all of main() so logs are flushed.
    let mut _log_guard = None;
    let tracing_guard = if let Some(ref endpoint) = cli.otlp_endpoint {
        let config = TracingConfig::new()
            .with_otlp_endpoint(endpoint)
            .with_stderr(!interactive);

        match config.init() {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Failed to initialize OpenTelemetry tracing: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else if interactive {
        let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        _log_guard = Some(guard);

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
        None
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        None
    };

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", exporter.bind_addr());
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let config_context = if cli.command.needs_config() {
        match load_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(e) => {
                eprintln!("Failed to load configuration: {:#}", e);
                std::process::exit(ExitCode::ValidationError.as_i32());
            }
        }
    } else {
        ConfigCommandContext::Placeholder
    };

    let shutdown = Shutdown::new();
    if !interactive {
        shutdown.trigger_on_ctrl_c();
    }

    let exit_code = match run_command(cli, config_context, &shutdown).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_interrupted(&e) => {
            eprintln!("Interrupted.");
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    if let Some(guard) = tracing_guard {
        guard.shutdown();
    }
    drop(_log_guard);

    std::process::exit(exit_code.as_i32());
}
