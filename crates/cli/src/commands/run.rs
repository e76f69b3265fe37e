//! Run command: listen for chords on this terminal.
//!
//! Responsibilities:
//! - Wire the terminal host, the selection source and the assistant
//!   handlers into a detector.
//! - Hold raw mode for the session and restore it on exit.
//!
//! Does NOT handle:
//! - Key mapping (see `host`).

use std::sync::Arc;

use anyhow::Result;
use selchord_config::Config;
use selchord_core::{
    Bindings, Detector, EventHub, SelectionProvider, SelectionSnapshot, SharedSelection,
    navigation_channel,
};

use crate::desktop::{Console, Desktop, SystemDesktop};
use crate::handlers::assistant_registry;
use crate::host::{ClipboardSelection, TerminalGuard, forward_keys};
use crate::shutdown::Shutdown;
use crate::sinks::TerminalSink;

use super::bound_actions;

fn banner(config: &Config, fixed_selection: bool) -> String {
    let chords = config
        .bindings
        .iter()
        .map(|spec| format!("  {0}{0}  {1}", spec.key.label(), spec.action.description()))
        .collect::<Vec<_>>()
        .join("\n");
    let source = if fixed_selection {
        "the --selection text (Ctrl+U clears it)"
    } else {
        "the clipboard"
    };
    format!(
        "selchord {} ({}ms window), selection from {}\n{}\nEsc or Ctrl+C quits, Ctrl+R simulates a navigation.",
        config.variant.as_str(),
        config.detector.window.as_millis(),
        source,
        chords
    )
}

pub async fn run(config: &Config, selection: Option<String>, shutdown: &Shutdown) -> Result<()> {
    let system = Arc::new(SystemDesktop::new(Console::Raw));
    let desktop: Arc<dyn Desktop> = system.clone();
    let registry = assistant_registry(super::assistant(config)?, desktop, bound_actions(config));

    let fixed = selection.map(|text| SharedSelection::new(SelectionSnapshot::text(text)));
    let provider: Arc<dyn SelectionProvider> = match &fixed {
        Some(shared) => Arc::new(shared.clone()),
        None => Arc::new(ClipboardSelection::new(Arc::clone(&system))),
    };

    eprintln!("{}", banner(config, fixed.is_some()));

    let hub = EventHub::new();
    let (nav_tx, nav_rx) = navigation_channel();
    let handle = Detector::new(
        config.detector.clone(),
        Bindings::new(config.bindings.clone())?,
        registry,
        Arc::new(hub.clone()),
        provider,
        Arc::new(TerminalSink::new(config.detector.status_timeout)),
    )
    .with_navigation(nav_rx)
    .start()?;

    let guard = TerminalGuard::enter()?;
    let result = forward_keys(hub, nav_tx, fixed, shutdown.clone()).await;
    handle.stop().await;
    drop(guard);
    eprintln!();

    result
}
