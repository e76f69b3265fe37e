//! Scripted sessions: replay selections, key presses and navigations
//! against a real detector and print what happens.
//!
//! Responsibilities:
//! - Parse and validate replay scripts (JSON).
//! - Drive an [`EventHub`], a [`SharedSelection`] and a location on schedule.
//! - Print a timeline of key decisions, statuses and desktop effects.
//!
//! Does NOT handle:
//! - Choosing handlers (the caller passes a registry).
//!
//! Invariants:
//! - Key press timestamps are `start + at_ms`, independent of scheduling
//!   jitter, so chord windows are judged on script time.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;

use selchord_config::{Config, KeybindError, PhysicalKey, parse_physical_key};
use selchord_core::{
    Detector, EventHub, HandlerRegistry, IgnoreReason, KeyDecision, KeyPress, KeyReport,
    LocationProbe, LocationWatcher, Modifiers, Rect, ReadinessProbe, SelectionSnapshot,
    SharedSelection, Status, StatusSink, navigation_channel,
};

use crate::desktop::{ConsoleDesktop, DesktopEvent};
use crate::shutdown::{Interrupted, Shutdown};
use crate::sinks::AutoClear;

const DEFAULT_SETTLE_MS: u64 = 2500;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Event {index}: {source}")]
    UnknownKey {
        index: usize,
        #[source]
        source: KeybindError,
    },

    #[error("Event {index} at {at_ms}ms is earlier than the event before it")]
    OutOfOrder { index: usize, at_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierName {
    Ctrl,
    Meta,
    Alt,
    Shift,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Replace the selection.
    Select {
        text: String,
        #[serde(default)]
        editable: bool,
    },
    /// Drop the selection.
    ClearSelection,
    /// Press a physical key ("J", "KeyJ", "Digit1", "F5", "Space").
    Key {
        key: String,
        #[serde(default)]
        modifiers: Vec<ModifierName>,
    },
    /// Change the host location.
    Navigate { to: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Host reports ready this long after start. Absent means always ready.
    #[serde(default)]
    pub ready_after_ms: Option<u64>,
    /// How long to keep running after the last event.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    pub events: Vec<ScriptEvent>,
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

impl Script {
    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        let script: Script = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&json)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        let mut last = 0;
        for (index, event) in self.events.iter().enumerate() {
            if event.at_ms < last {
                return Err(ScriptError::OutOfOrder {
                    index,
                    at_ms: event.at_ms,
                });
            }
            last = event.at_ms;
            if let ScriptAction::Key { key, .. } = &event.action {
                parse_physical_key(key).map_err(|source| ScriptError::UnknownKey { index, source })?;
            }
        }
        Ok(())
    }

    /// Time of the last event plus the settle period.
    pub fn duration(&self) -> Duration {
        let last = self.events.last().map_or(0, |e| e.at_ms);
        Duration::from_millis(last.saturating_add(self.settle_ms))
    }
}

fn modifiers(names: &[ModifierName]) -> Modifiers {
    names.iter().fold(Modifiers::NONE, |mut m, name| {
        match name {
            ModifierName::Ctrl => m.ctrl = true,
            ModifierName::Meta => m.meta = true,
            ModifierName::Alt => m.alt = true,
            ModifierName::Shift => m.shift = true,
        }
        m
    })
}

/// Prints timestamped lines relative to the start of a replay.
#[derive(Clone)]
pub struct Timeline {
    start: Instant,
    lines: Arc<Mutex<Vec<String>>>,
    echo: bool,
}

impl Timeline {
    pub fn new(echo: bool) -> Self {
        Self {
            start: Instant::now(),
            lines: Arc::default(),
            echo,
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn record(&self, message: impl AsRef<str>) {
        let line = format!(
            "{:>6}ms {}",
            self.start.elapsed().as_millis(),
            message.as_ref()
        );
        if self.echo {
            println!("{}", line);
        }
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
    }

    /// Recorded lines without their timestamps.
    #[cfg(test)]
    pub fn messages(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|line| {
                line.split_once("ms ")
                    .map_or(line.as_str(), |(_, message)| message)
                    .to_string()
            })
            .collect()
    }
}

/// Status sink that writes to a [`Timeline`] and fades like the terminal badge.
pub struct TimelineSink {
    timeline: Timeline,
    fade: AutoClear,
}

impl TimelineSink {
    pub fn new(timeline: Timeline, status_timeout: Duration) -> Self {
        Self {
            timeline,
            fade: AutoClear::new(status_timeout),
        }
    }
}

impl StatusSink for TimelineSink {
    fn show(&self, status: Status, _anchor: Option<Rect>) {
        self.timeline.record(format!("status {}", status));
        let timeline = self.timeline.clone();
        self.fade
            .schedule(status, move || timeline.record("status faded"));
    }

    fn clear(&self) {
        self.fade.bump();
        self.timeline.record("status cleared");
    }
}

/// Desktop that writes each effect to the timeline.
pub fn timeline_desktop(timeline: &Timeline) -> ConsoleDesktop {
    let timeline = timeline.clone();
    ConsoleDesktop::observed(Arc::new(move |event: &DesktopEvent| {
        timeline.record(event.describe())
    }))
}

pub fn describe_report(report: &KeyReport) -> String {
    let key = report.press.key;
    match &report.decision {
        KeyDecision::Ignored(reason) => {
            let reason = match reason {
                IgnoreReason::Unbound => "unbound",
                IgnoreReason::Modifier => "modifier",
                IgnoreReason::Busy => "busy",
            };
            format!("key {} ignored ({})", key, reason)
        }
        KeyDecision::Typed => format!("key {} typed", key),
        KeyDecision::Armed { suppress } => format!("key {} armed suppress={}", key, suppress),
        KeyDecision::Fired { chord, suppress } => format!(
            "key {} fired {} {:?} suppress={}",
            key, chord.action, chord.text, suppress
        ),
    }
}

#[derive(Debug, Default)]
struct ScriptLocation(Mutex<String>);

impl ScriptLocation {
    fn set(&self, location: &str) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = location.to_string();
    }
}

impl LocationProbe for ScriptLocation {
    fn location(&self) -> String {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

struct ReadyAt(Instant);

impl ReadinessProbe for ReadyAt {
    fn is_ready(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// Play `script` against a detector built from `config` and `registry`.
///
/// Returns `Interrupted` if `shutdown` fires first.
pub async fn replay(
    config: &Config,
    script: &Script,
    registry: HandlerRegistry,
    timeline: Timeline,
    shutdown: Shutdown,
) -> anyhow::Result<()> {
    let hub = EventHub::new();
    let selection = SharedSelection::default();
    let location = Arc::new(ScriptLocation::default());
    let (nav_tx, nav_rx) = navigation_channel();
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();

    let sink = TimelineSink::new(timeline.clone(), config.detector.status_timeout);
    let mut detector = Detector::new(
        config.detector.clone(),
        selchord_core::Bindings::new(config.bindings.clone())?,
        registry,
        Arc::new(hub.clone()),
        Arc::new(selection.clone()),
        Arc::new(sink),
    )
    .with_navigation(nav_rx)
    .with_key_reports(report_tx);

    let start = timeline.start();
    let start_std = std::time::Instant::now();
    if let Some(ms) = script.ready_after_ms {
        detector = detector.with_readiness(Arc::new(ReadyAt(start + Duration::from_millis(ms))));
    }

    let handle = detector.start()?;
    let watcher = LocationWatcher::spawn(
        Arc::clone(&location) as Arc<dyn LocationProbe>,
        config.detector.location_poll,
        nav_tx,
    );

    let printer = {
        let timeline = timeline.clone();
        tokio::spawn(async move {
            while let Some(report) = report_rx.recv().await {
                timeline.record(describe_report(&report));
            }
        })
    };

    let play = async {
        for event in &script.events {
            let offset = Duration::from_millis(event.at_ms);
            tokio::time::sleep_until(start + offset).await;
            match &event.action {
                ScriptAction::Select { text, editable } => {
                    let mut snapshot = SelectionSnapshot::text(text.clone());
                    if *editable {
                        snapshot = snapshot.in_editable();
                    }
                    selection.set(snapshot);
                    hub.emit_selection_change();
                    timeline.record(format!("select {:?}", text));
                }
                ScriptAction::ClearSelection => {
                    selection.clear();
                    hub.emit_selection_change();
                    timeline.record("select cleared");
                }
                ScriptAction::Key { key, modifiers: names } => {
                    let key: PhysicalKey = key.parse()?;
                    let press = KeyPress::new(key, start_std + offset)
                        .with_modifiers(modifiers(names));
                    if hub.emit_key(press) == 0 {
                        timeline.record(format!("key {} not delivered", key));
                    }
                }
                ScriptAction::Navigate { to } => {
                    location.set(to);
                    timeline.record(format!("navigate {}", to));
                }
            }
        }
        tokio::time::sleep_until(start + script.duration()).await;
        Ok::<(), anyhow::Error>(())
    };

    let result = tokio::select! {
        result = play => result,
        _ = shutdown.wait() => Err(Interrupted.into()),
    };

    watcher.stop();
    handle.stop().await;
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "Report printer ended abnormally");
    }
    result
}
