//! Low-level listener subscriptions and their lifecycle.
//!
//! Responsibilities:
//! - Define `ListenerHost`, the source of key and selection-change events.
//! - Provide `Subscription`, an RAII handle that unregisters on drop.
//! - Provide `EventHub`, a host that fans events out to its subscribers.
//! - Provide `ListenerLifecycle` with idempotent attach/detach.
//!
//! Does NOT handle:
//! - Interpreting key presses (see `chord`).
//! - Deciding when to re-attach (see `detector`).
//!
//! Invariants:
//! - A `ListenerLifecycle` owns at most one `Subscription` at a time.
//! - Dropping a `Subscription` unregisters it from its host before the drop returns.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use selchord_config::constants::DEFAULT_CHANNEL_CAPACITY;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::key::KeyPress;

/// Event delivered through a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Key(KeyPress),
    SelectionChanged,
}

/// Something a detector can subscribe to for key and selection-change events.
pub trait ListenerHost: Send + Sync {
    fn subscribe(&self) -> Subscription;
}

impl<T: ListenerHost + ?Sized> ListenerHost for Arc<T> {
    fn subscribe(&self) -> Subscription {
        (**self).subscribe()
    }
}

/// Registered key and selection-change listeners. Unregisters on drop.
pub struct Subscription {
    keys: mpsc::Receiver<KeyPress>,
    selection_changes: mpsc::Receiver<()>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap host channels; `on_drop` runs exactly once when the subscription is dropped.
    pub fn new(
        keys: mpsc::Receiver<KeyPress>,
        selection_changes: mpsc::Receiver<()>,
        on_drop: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            keys,
            selection_changes,
            on_drop: Some(Box::new(on_drop)),
        }
    }

    /// Next event, or `None` once the host has gone away.
    pub async fn recv(&mut self) -> Option<HostEvent> {
        tokio::select! {
            key = self.keys.recv() => key.map(HostEvent::Key),
            change = self.selection_changes.recv() => change.map(|()| HostEvent::SelectionChanged),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct ListenerSlot {
    id: u64,
    keys: mpsc::Sender<KeyPress>,
    selection_changes: mpsc::Sender<()>,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    slots: Vec<ListenerSlot>,
}

/// In-process host: whoever owns the hub pushes events, subscribers receive them.
#[derive(Clone)]
pub struct EventHub {
    state: Arc<Mutex<HubState>>,
    capacity: usize,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState::default())),
            capacity: capacity.max(1),
        }
    }

    /// Deliver a key press to every subscriber. Returns how many received it.
    pub fn emit_key(&self, press: KeyPress) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .slots
            .iter()
            .filter(|slot| deliver(&slot.keys, press, "key"))
            .count()
    }

    /// Notify every subscriber that the selection changed.
    pub fn emit_selection_change(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .slots
            .iter()
            .filter(|slot| deliver(&slot.selection_changes, (), "selection"))
            .count()
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .slots
            .len()
    }
}

fn deliver<T>(tx: &mpsc::Sender<T>, value: T, kind: &'static str) -> bool {
    match tx.try_send(value) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(kind, "Listener queue full, dropping event");
            false
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

fn unregister(state: &Weak<Mutex<HubState>>, id: u64) {
    if let Some(state) = state.upgrade() {
        let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
        state.slots.retain(|slot| slot.id != id);
    }
}

impl ListenerHost for EventHub {
    fn subscribe(&self) -> Subscription {
        let (key_tx, key_rx) = mpsc::channel(self.capacity);
        let (sel_tx, sel_rx) = mpsc::channel(self.capacity);

        let id = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let id = state.next_id;
            state.next_id += 1;
            state.slots.push(ListenerSlot {
                id,
                keys: key_tx,
                selection_changes: sel_tx,
            });
            id
        };

        let weak = Arc::downgrade(&self.state);
        Subscription::new(key_rx, sel_rx, move || unregister(&weak, id))
    }
}

/// Attach/detach state of one detector's listeners.
pub struct ListenerLifecycle<H> {
    host: H,
    subscription: Option<Subscription>,
}

impl<H: ListenerHost> ListenerLifecycle<H> {
    /// Create detached.
    pub fn new(host: H) -> Self {
        Self {
            host,
            subscription: None,
        }
    }

    /// Subscribe if not already attached. Returns whether a subscription was created.
    pub fn attach(&mut self) -> bool {
        if self.subscription.is_some() {
            return false;
        }
        self.subscription = Some(self.host.subscribe());
        tracing::debug!("Listeners attached");
        true
    }

    /// Drop the subscription if attached. Returns whether one was dropped.
    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                drop(subscription);
                tracing::debug!("Listeners detached");
                true
            }
            None => false,
        }
    }

    /// Attach only when detached. Returns whether it attached.
    pub fn reattach_if_needed(&mut self) -> bool {
        self.attach()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Next host event. Never resolves while detached.
    ///
    /// If the host goes away, the lifecycle detaches and `None` is returned.
    pub async fn next_event(&mut self) -> Option<HostEvent> {
        let Some(subscription) = self.subscription.as_mut() else {
            return std::future::pending().await;
        };
        let event = subscription.recv().await;
        if event.is_none() {
            self.detach();
        }
        event
    }
}
