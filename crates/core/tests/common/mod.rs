//! Shared helpers for detector integration tests.
//!
//! Tests run on Tokio's paused clock. Key presses carry explicit timestamps
//! relative to a fixed base, so chord timing never depends on the scheduler.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[allow(unused_imports)]
pub use selchord_config::{ActionId, BindingSpec, DetectorSettings, PhysicalKey, Variant};
#[allow(unused_imports)]
pub use selchord_core::{
    Bindings, ChordHandler, Detector, DetectorHandle, EventHub, HandlerRegistry, KeyPress,
    Outcome, SelectionSnapshot, SharedSelection, Status, StatusEvent, StatusLog,
};

/// Every handler invocation: which action, with what text.
pub type Calls = Arc<Mutex<Vec<(ActionId, String)>>>;

/// Host-side fixtures for one detector.
pub struct Harness {
    pub hub: EventHub,
    pub selection: SharedSelection,
    pub log: StatusLog,
    pub calls: Calls,
    base: Instant,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self {
            hub: EventHub::new(),
            selection: SharedSelection::default(),
            log: StatusLog::new(),
            calls: Arc::default(),
            base: Instant::now(),
        }
    }

    /// Select `text` outside any editable surface.
    pub fn select(&self, text: &str) {
        self.selection.set(SelectionSnapshot::text(text));
    }

    /// Press letter `key` at `at_ms` after the harness base time.
    pub fn press(&self, key: char, at_ms: u64) -> usize {
        self.hub.emit_key(KeyPress::new(
            PhysicalKey::Letter(key),
            self.base + Duration::from_millis(at_ms),
        ))
    }

    pub fn calls(&self) -> Vec<(ActionId, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// A detector over this harness's hub, selection and log.
    pub fn detector(
        &self,
        settings: DetectorSettings,
        bindings: Bindings,
        registry: HandlerRegistry,
    ) -> Detector {
        Detector::new(
            settings,
            bindings,
            registry,
            Arc::new(self.hub.clone()),
            Arc::new(self.selection.clone()),
            Arc::new(self.log.clone()),
        )
    }
}

/// Bindings from `(letter, action)` pairs.
#[allow(dead_code)]
pub fn bindings(pairs: &[(char, ActionId)]) -> Bindings {
    Bindings::new(pairs.iter().map(|&(c, action)| BindingSpec {
        key: PhysicalKey::Letter(c),
        action,
    }))
    .unwrap()
}

/// Handler that records its call and finishes with `outcome`.
#[allow(dead_code)]
pub fn recorder(calls: Calls, action: ActionId, outcome: Outcome) -> impl ChordHandler {
    move |text: String| {
        let calls = calls.clone();
        async move {
            calls.lock().unwrap().push((action, text));
            anyhow::Ok(outcome)
        }
    }
}

/// Let spawned tasks (actor and handlers) run to quiescence.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advance Tokio's paused clock, then settle.
#[allow(dead_code)]
pub async fn advance_and_settle(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}
