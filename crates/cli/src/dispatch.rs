//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command implementations.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::ConfigCommandContext;
use crate::shutdown::Shutdown;

pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    shutdown: &Shutdown,
) -> Result<()> {
    match cli.command {
        Commands::Run { selection } => {
            let config = config.into_real_config()?;
            commands::run::run(&config, selection, shutdown).await?;
        }
        Commands::Replay { script, echo } => {
            let config = config.into_real_config()?;
            commands::replay::run(&config, &script, echo, shutdown).await?;
        }
        Commands::Ask {
            action,
            text,
            print_only,
        } => {
            let config = config.into_real_config()?;
            commands::ask::run(&config, action, &text, print_only, shutdown).await?;
        }
        Commands::Bindings { json } => {
            let config = config.into_real_config()?;
            commands::bindings::run(&config, json)?;
        }
        Commands::TicketSummary { file, no_copy } => {
            commands::ticket_summary::run(&file, no_copy)?;
        }
    }

    Ok(())
}
