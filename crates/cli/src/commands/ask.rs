//! Ask command: run one action directly, without chord detection.
//!
//! Responsibilities:
//! - Run an action over text given on the command line.
//! - Present the result on the desktop, or print it with `--print-only`.
//!
//! Does NOT handle:
//! - Status badges; the exit code carries success or failure.

use std::sync::Arc;

use anyhow::{Context, Result};
use selchord_config::{ActionId, Config};

use crate::desktop::{Console, ConsoleDesktop, Desktop, SystemDesktop};
use crate::handlers::present;
use crate::shutdown::{Interrupted, Shutdown};

pub async fn run(
    config: &Config,
    action: ActionId,
    text: &str,
    print_only: bool,
    shutdown: &Shutdown,
) -> Result<()> {
    let text = text.trim();
    anyhow::ensure!(!text.is_empty(), "no text given for {}", action);

    let desktop: Arc<dyn Desktop> = if print_only {
        Arc::new(ConsoleDesktop::printing(Console::Cooked))
    } else {
        Arc::new(SystemDesktop::new(Console::Cooked))
    };

    let assistant = super::assistant(config)?;
    tracing::info!(%action, model = assistant.client().model(), "Running action");

    let result = tokio::select! {
        result = assistant.run(action, text) => result,
        _ = shutdown.wait() => return Err(Interrupted.into()),
    };

    match result {
        Ok(result) => {
            let outcome = present(action, result, desktop.as_ref())?;
            tracing::debug!(?outcome, "Action presented");
            Ok(())
        }
        Err(err) => {
            if let Some(dialog) = err.dialog(action) {
                desktop.dialog(&dialog);
            }
            Err(err).with_context(|| format!("{} failed", action))
        }
    }
}
