//! Location-change detection.
//!
//! Responsibilities:
//! - Define `NavigationSignal` and the channel that carries it.
//! - Poll a `LocationProbe` and signal whenever the location changes.
//!
//! Does NOT handle:
//! - Reacting to navigation (the detector detaches and re-attaches).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Zero-payload "the host location changed" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationSignal;

/// Receiving end handed to a detector.
pub type NavigationReceiver = mpsc::UnboundedReceiver<NavigationSignal>;

/// Sending end held by hosts and watchers.
#[derive(Debug, Clone)]
pub struct NavigationSender {
    tx: mpsc::UnboundedSender<NavigationSignal>,
}

impl NavigationSender {
    /// Signal a navigation. Returns false if the detector is gone.
    pub fn notify(&self) -> bool {
        self.tx.send(NavigationSignal).is_ok()
    }
}

/// Create a navigation channel.
pub fn navigation_channel() -> (NavigationSender, NavigationReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NavigationSender { tx }, rx)
}

/// Reports the host's current logical location.
pub trait LocationProbe: Send + Sync {
    fn location(&self) -> String;
}

/// Background poller that signals on every location change.
///
/// The task is aborted when the watcher is dropped.
#[derive(Debug)]
pub struct LocationWatcher {
    task: JoinHandle<()>,
}

impl LocationWatcher {
    /// Start polling `probe` every `interval`.
    pub fn spawn(
        probe: Arc<dyn LocationProbe>,
        interval: Duration,
        sender: NavigationSender,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut current = probe.location();
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let location = probe.location();
                if location == current {
                    continue;
                }
                tracing::debug!(from = %current, to = %location, "Location changed");
                current = location;
                if !sender.notify() {
                    break;
                }
            }
        });

        Self { task }
    }

    /// Stop polling.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for LocationWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
