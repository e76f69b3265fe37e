//! Chord handlers and their registry.
//!
//! Responsibilities:
//! - Define the `ChordHandler` trait invoked with the selected text.
//! - Map handler outcomes to terminal statuses.
//! - Hold the action → handler registry a detector dispatches through.
//!
//! Does NOT handle:
//! - Deciding when to dispatch (see `chord`).
//! - Containing handler failures (the detector runs handlers in their own task).

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use selchord_config::{ActionId, PhysicalKey};

use crate::selection::Rect;
use crate::status::Status;

/// How a handler finished, as decided by whoever registered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The task completed (result shown or opened).
    Success,
    /// The task completed and placed its result on the clipboard.
    Copied,
}

impl Outcome {
    pub fn status(self) -> Status {
        match self {
            Self::Success => Status::Success,
            Self::Copied => Status::Copied,
        }
    }
}

/// Asynchronous task run when a chord is recognized.
pub trait ChordHandler: Send + Sync {
    fn handle(&self, text: String) -> BoxFuture<'static, anyhow::Result<Outcome>>;
}

impl<F, Fut> ChordHandler for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Outcome>> + Send + 'static,
{
    fn handle(&self, text: String) -> BoxFuture<'static, anyhow::Result<Outcome>> {
        (self)(text).boxed()
    }
}

/// A recognized chord, ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub key: PhysicalKey,
    pub action: ActionId,
    /// Trimmed, non-empty selected text.
    pub text: String,
    pub anchor: Option<Rect>,
}

/// Action → handler lookup.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ActionId, Arc<dyn ChordHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `action`, replacing any previous one.
    pub fn register<H>(&mut self, action: ActionId, handler: H) -> &mut Self
    where
        H: ChordHandler + 'static,
    {
        self.handlers.insert(action, Arc::new(handler));
        self
    }

    pub fn get(&self, action: ActionId) -> Option<Arc<dyn ChordHandler>> {
        self.handlers.get(&action).cloned()
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.handlers.contains_key(&action)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.handlers.keys().collect();
        actions.sort();
        f.debug_struct("HandlerRegistry")
            .field("actions", &actions)
            .finish()
    }
}
