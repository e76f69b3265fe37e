//! Text selection snapshots and providers.
//!
//! Responsibilities:
//! - Define the snapshot a host reports for "what is selected right now".
//! - Provide `SharedSelection`, a settable provider for hosts without a
//!   native selection (terminal, replay, tests).
//!
//! Does NOT handle:
//! - Watching for selection changes (hosts emit those through `EventHub`).

use std::sync::{Arc, Mutex};

/// Screen rectangle of the selection, used to anchor status badges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What the host reports as selected at a point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSnapshot {
    /// Raw selected text (may be empty or whitespace).
    pub text: String,
    /// Whether input focus is inside an editable surface.
    pub is_editable_focus: bool,
    /// Where the selection is drawn, if known.
    pub bounding_rect: Option<Rect>,
}

impl SelectionSnapshot {
    /// Snapshot of `text` with focus outside any editable surface.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Mark focus as inside an editable surface.
    pub fn in_editable(mut self) -> Self {
        self.is_editable_focus = true;
        self
    }

    /// Selected text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// True when the trimmed selection is empty.
    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Source of the current selection.
pub trait SelectionProvider: Send + Sync {
    fn snapshot(&self) -> SelectionSnapshot;
}

/// Selection held in memory and replaced by the host.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionSnapshot>>,
}

impl SharedSelection {
    pub fn new(initial: SelectionSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Replace the current selection.
    pub fn set(&self, snapshot: SelectionSnapshot) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = snapshot;
    }

    /// Clear the selection.
    pub fn clear(&self) {
        self.set(SelectionSnapshot::default());
    }
}

impl SelectionProvider for SharedSelection {
    fn snapshot(&self) -> SelectionSnapshot {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
