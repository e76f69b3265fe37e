//! Shutdown signalling for long-running commands.
//!
//! Responsibilities:
//! - A cloneable trigger that `run` and `replay` wait on.
//! - The `Interrupted` error that maps to exit code 130.
//!
//! Does NOT handle:
//! - Reading Ctrl+C while the terminal is in raw mode (the terminal host
//!   sees it as a key press and triggers shutdown itself).
//!
//! Invariants:
//! - Once triggered, a shutdown stays triggered.

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

#[derive(Clone, Debug, Default)]
pub struct Shutdown {
    triggered: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown (idempotent).
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait(&self) {
        let notified = self.notify.notified();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }

    /// Trigger on SIGINT. Used by commands that leave the terminal cooked.
    pub fn trigger_on_ctrl_c(&self) {
        let shutdown = self.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            shutdown.trigger();
        });
    }
}

/// The user interrupted a command before it finished.
#[derive(Debug, Clone, Copy)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interrupted")
    }
}

impl std::error::Error for Interrupted {}

pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.is::<Interrupted>()
}
