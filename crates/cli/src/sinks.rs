//! Status renderers for the terminal.
//!
//! Responsibilities:
//! - `TerminalSink`: a colored badge on one stderr line, rewritten in place.
//! - `AutoClear`: fades transient statuses after the configured timeout.
//!
//! Invariants:
//! - A fade scheduled for an earlier status never clears a later one.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use selchord_core::{Rect, Status, StatusSink};

/// Parse a `#rrggbb` badge color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Schedules the fade of transient statuses.
#[derive(Clone)]
pub struct AutoClear {
    generation: Arc<AtomicU64>,
    timeout: Duration,
}

impl AutoClear {
    pub fn new(timeout: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            timeout,
        }
    }

    /// Record that something new is visible, cancelling any pending fade.
    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Bump, and if `status` fades, run `clear` after the timeout unless
    /// something else was shown or cleared meanwhile.
    pub fn schedule(&self, status: Status, clear: impl FnOnce() + Send + 'static) {
        let current = self.bump();
        let Some(delay) = status.auto_clear(self.timeout) else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let generation = Arc::clone(&self.generation);
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) == current {
                clear();
            }
        });
    }
}

/// Draws the status badge on the current stderr line.
#[derive(Clone)]
pub struct TerminalSink {
    fade: AutoClear,
}

impl TerminalSink {
    pub fn new(status_timeout: Duration) -> Self {
        Self {
            fade: AutoClear::new(status_timeout),
        }
    }

    fn draw(status: Option<Status>) {
        let mut err = std::io::stderr().lock();
        let _ = crossterm::queue!(err, MoveToColumn(0), Clear(ClearType::CurrentLine));
        if let Some(status) = status {
            let background = hex_color(status.color()).unwrap_or(Color::DarkGrey);
            let _ = crossterm::queue!(
                err,
                SetBackgroundColor(background),
                SetForegroundColor(Color::White),
                Print(format!(" {} ", status.label())),
                ResetColor
            );
        }
        let _ = err.flush();
    }
}

impl StatusSink for TerminalSink {
    fn show(&self, status: Status, _anchor: Option<Rect>) {
        Self::draw(Some(status));
        self.fade.schedule(status, || Self::draw(None));
    }

    fn clear(&self) {
        self.fade.bump();
        Self::draw(None);
    }
}
