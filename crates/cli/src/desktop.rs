//! Clipboard, browser and dialog surfaces used by chord handlers.
//!
//! Responsibilities:
//! - `SystemDesktop`: the real clipboard (arboard) and browser (open).
//! - `ConsoleDesktop`: prints instead of touching the system, for `--print-only`
//!   and scripted replays.
//! - Rendering dialogs as framed text, raw-mode aware.
//!
//! Does NOT handle:
//! - Status badges (see `sinks`).

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use selchord_client::Dialog;

/// Side effects a finished action can have.
pub trait Desktop: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
    fn open_url(&self, url: &str) -> Result<()>;
    fn dialog(&self, dialog: &Dialog);
}

/// Where rendered text goes. Raw-mode terminals need explicit carriage returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Cooked,
    Raw,
}

impl Console {
    pub fn line_ending(self) -> &'static str {
        match self {
            Console::Cooked => "\n",
            Console::Raw => "\r\n",
        }
    }

    /// Write `text` to stdout, translating line endings.
    pub fn print(self, text: &str) {
        let mut out = std::io::stdout().lock();
        let rendered = text.replace('\n', self.line_ending());
        let _ = write!(out, "{}{}", rendered, self.line_ending());
        let _ = out.flush();
    }
}

/// Frame a dialog as plain text.
pub fn render_dialog(dialog: &Dialog) -> String {
    let rule = "─".repeat(dialog.title.chars().count().clamp(20, 60));
    format!("┌ {}\n{}\n{}\n└{}", dialog.title, rule, dialog.body, rule)
}

/// Real clipboard and browser.
pub struct SystemDesktop {
    console: Console,
    // Held open: on X11 the clipboard owner must stay alive for pastes to work.
    clipboard: Mutex<Option<arboard::Clipboard>>,
}

impl SystemDesktop {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            clipboard: Mutex::new(None),
        }
    }

    fn with_clipboard<T>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T> {
        let mut guard = self.clipboard.lock().unwrap_or_else(|e| e.into_inner());
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().context("clipboard unavailable")?);
        }
        let clipboard = guard
            .as_mut()
            .context("clipboard unavailable")?;
        f(clipboard).context("clipboard operation failed")
    }

    /// Current clipboard text, if any.
    pub fn clipboard_text(&self) -> Option<String> {
        self.with_clipboard(|c| c.get_text()).ok()
    }
}

impl Desktop for SystemDesktop {
    fn copy(&self, text: &str) -> Result<()> {
        self.with_clipboard(|c| c.set_text(text.to_string()))
    }

    fn open_url(&self, url: &str) -> Result<()> {
        tracing::info!(url, "Opening search URL");
        open::that(url).with_context(|| format!("failed to open {}", url))
    }

    fn dialog(&self, dialog: &Dialog) {
        self.console.print(&render_dialog(dialog));
    }
}

/// Something a [`ConsoleDesktop`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopEvent {
    Copied(String),
    Opened(String),
    Dialog(Dialog),
}

impl DesktopEvent {
    pub fn describe(&self) -> String {
        match self {
            DesktopEvent::Copied(text) => format!("copy {:?}", text),
            DesktopEvent::Opened(url) => format!("open {}", url),
            DesktopEvent::Dialog(d) => format!("dialog {:?}: {:?}", d.title, d.body),
        }
    }
}

type EventObserver = Arc<dyn Fn(&DesktopEvent) + Send + Sync>;

/// Prints and records instead of touching the system.
#[derive(Clone)]
pub struct ConsoleDesktop {
    events: Arc<Mutex<Vec<DesktopEvent>>>,
    observer: EventObserver,
    fail_copies: bool,
}

impl ConsoleDesktop {
    /// Print each event to stdout as it happens.
    pub fn printing(console: Console) -> Self {
        Self::observed(Arc::new(move |event: &DesktopEvent| match event {
            DesktopEvent::Dialog(d) => console.print(&render_dialog(d)),
            other => console.print(&other.describe()),
        }))
    }

    /// Hand each event to `observer` as it happens.
    pub fn observed(observer: EventObserver) -> Self {
        Self {
            events: Arc::default(),
            observer,
            fail_copies: false,
        }
    }

    /// Make every copy fail, as a locked clipboard would.
    #[cfg(test)]
    pub fn with_failing_clipboard(mut self) -> Self {
        self.fail_copies = true;
        self
    }

    #[cfg(test)]
    pub fn events(&self) -> Vec<DesktopEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, event: DesktopEvent) {
        (self.observer)(&event);
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl Desktop for ConsoleDesktop {
    fn copy(&self, text: &str) -> Result<()> {
        if self.fail_copies {
            anyhow::bail!("clipboard unavailable");
        }
        self.record(DesktopEvent::Copied(text.to_string()));
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.record(DesktopEvent::Opened(url.to_string()));
        Ok(())
    }

    fn dialog(&self, dialog: &Dialog) {
        self.record(DesktopEvent::Dialog(dialog.clone()));
    }
}
