//! The terminal as a chord host.
//!
//! Responsibilities:
//! - Put the terminal in raw mode for the session and restore it on drop.
//! - Translate crossterm key presses into [`KeyPress`]es on an [`EventHub`].
//! - Map control keys to host events: quit, navigation, selection clear.
//! - Expose the system clipboard as the selection source.
//!
//! Does NOT handle:
//! - Chord recognition or dispatch (see `selchord_core::Detector`).
//!
//! Invariants:
//! - Only `KeyEventKind::Press` events reach the hub; repeats and releases
//!   are dropped.
//! - Terminals report characters, not key positions. A letter is mapped to
//!   the key that produces it on a QWERTY layout.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use selchord_config::PhysicalKey;
use selchord_core::{
    EventHub, KeyPress, Modifiers, NavigationSender, SelectionProvider, SelectionSnapshot,
    SharedSelection,
};

use crate::desktop::SystemDesktop;
use crate::shutdown::Shutdown;

/// Restores cooked mode when dropped, including during unwinding.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// What a terminal key press means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalInput {
    /// A press to feed to the detector.
    Press(PhysicalKey, Modifiers),
    /// Esc or Ctrl+C.
    Quit,
    /// Ctrl+R: treat as a navigation.
    Navigate,
    /// Ctrl+U: drop the current selection.
    ClearSelection,
    /// Keys with no physical mapping (arrows, Tab, ...).
    Unmapped,
}

pub fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
    }
}

pub fn map_key(code: KeyCode) -> Option<PhysicalKey> {
    match code {
        KeyCode::Char(' ') => Some(PhysicalKey::Space),
        KeyCode::Char(c) if c.is_ascii_digit() => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(PhysicalKey::Digit),
        KeyCode::Char(c) => PhysicalKey::letter(c),
        KeyCode::F(n) if (1..=12).contains(&n) => Some(PhysicalKey::F(n)),
        _ => None,
    }
}

pub fn classify(key: &KeyEvent) -> TerminalInput {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => TerminalInput::Quit,
        KeyCode::Char('c') if ctrl => TerminalInput::Quit,
        KeyCode::Char('r') if ctrl => TerminalInput::Navigate,
        KeyCode::Char('u') if ctrl => TerminalInput::ClearSelection,
        code => match map_key(code) {
            Some(physical) => TerminalInput::Press(physical, map_modifiers(key.modifiers)),
            None => TerminalInput::Unmapped,
        },
    }
}

/// Selection read from the system clipboard on every chord.
pub struct ClipboardSelection {
    desktop: Arc<SystemDesktop>,
}

impl ClipboardSelection {
    pub fn new(desktop: Arc<SystemDesktop>) -> Self {
        Self { desktop }
    }
}

impl SelectionProvider for ClipboardSelection {
    fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::text(self.desktop.clipboard_text().unwrap_or_default())
    }
}

/// Forward terminal key presses to `hub` until quit, end of input or shutdown.
///
/// `selection` is cleared on Ctrl+U when the session has a fixed selection.
pub async fn forward_keys(
    hub: EventHub,
    navigation: NavigationSender,
    selection: Option<SharedSelection>,
    shutdown: Shutdown,
) -> Result<()> {
    let mut reader = EventStream::new();

    loop {
        let event = tokio::select! {
            _ = shutdown.wait() => break,
            event = reader.next() => event,
        };

        let key = match event {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => key,
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(e.into()),
            None => break,
        };

        match classify(&key) {
            TerminalInput::Press(physical, modifiers) => {
                let press = KeyPress::new(physical, Instant::now()).with_modifiers(modifiers);
                if hub.emit_key(press) == 0 {
                    tracing::debug!(key = %physical, "No listener attached, press dropped");
                }
            }
            TerminalInput::Quit => {
                shutdown.trigger();
                break;
            }
            TerminalInput::Navigate => {
                tracing::info!("Navigation requested");
                navigation.notify();
            }
            TerminalInput::ClearSelection => {
                if let Some(selection) = &selection {
                    selection.clear();
                    hub.emit_selection_change();
                }
            }
            TerminalInput::Unmapped => {}
        }
    }

    Ok(())
}
