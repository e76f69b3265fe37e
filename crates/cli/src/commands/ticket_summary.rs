//! Ticket summary command: format the split-ticket block from JSON.

use std::path::Path;

use anyhow::{Context, Result};
use selchord_client::TicketInfo;

use crate::desktop::{Console, Desktop, SystemDesktop};

pub fn read_ticket(path: &Path) -> Result<TicketInfo> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let info = serde_json::from_str(&json)
        .with_context(|| format!("Invalid ticket JSON in {}", path.display()))?;
    Ok(info)
}

pub fn run(file: &Path, no_copy: bool) -> Result<()> {
    let summary = read_ticket(file)?.format_summary();
    println!("{}", summary);

    if !no_copy {
        match SystemDesktop::new(Console::Cooked).copy(&summary) {
            Ok(()) => eprintln!("Summary copied to clipboard"),
            Err(e) => {
                tracing::warn!(error = %e, "Could not copy summary");
                eprintln!("Warning: could not copy to clipboard: {:#}", e);
            }
        }
    }

    Ok(())
}
