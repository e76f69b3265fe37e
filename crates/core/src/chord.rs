//! Double-press chord recognition.
//!
//! Responsibilities:
//! - Track, per bound key, when it was last pressed (`KeyArm`).
//! - Decide for every key press whether it is ignored, ordinary typing, the
//!   first press of a chord, or a recognized chord (`KeyDecision`).
//! - Hold the detector-wide dispatch lock (`Phase`).
//!
//! Does NOT handle:
//! - Running handlers or emitting statuses (see `detector`).
//! - Receiving events from the host (see `listener`).
//!
//! Invariants:
//! - A chord fires only when `0 < delta < window` between two presses of the
//!   same key, with a non-empty selection at the second press.
//! - The key's arm is reset to `Never` at the moment its chord fires.
//! - While `Phase::Busy`, every press is ignored and no state changes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use selchord_config::{PhysicalKey, SuppressionPolicy};

use crate::binding::Bindings;
use crate::dispatch::Chord;
use crate::key::KeyPress;
use crate::selection::SelectionProvider;

/// Per-key arm state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyArm {
    /// No qualifying press recorded (or reset after a chord).
    Never,
    /// Last qualifying press time.
    Armed(Instant),
}

/// Dispatch lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A handler is in flight.
    Busy,
}

/// Why a press was ignored outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Unbound,
    Modifier,
    Busy,
}

/// What the detector made of a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyDecision {
    /// The press is not ours: unbound key, command modifier, or lock held.
    Ignored(IgnoreReason),
    /// Ordinary typing: no selection (or editable focus under
    /// `UnlessEditableFocus`). The press time is recorded.
    Typed,
    /// First press of a potential chord.
    Armed { suppress: bool },
    /// Second press inside the window: dispatch `chord`.
    Fired { chord: Chord, suppress: bool },
}

impl KeyDecision {
    /// Whether the host should suppress the key's default effect.
    pub fn suppresses_default(&self) -> bool {
        match self {
            Self::Armed { suppress } | Self::Fired { suppress, .. } => *suppress,
            Self::Ignored(_) | Self::Typed => false,
        }
    }
}

/// Pure chord state machine over a fixed set of bindings.
#[derive(Debug, Clone)]
pub struct ChordDetector {
    bindings: Bindings,
    arms: HashMap<PhysicalKey, KeyArm>,
    window: Duration,
    suppression: SuppressionPolicy,
    phase: Phase,
}

impl ChordDetector {
    pub fn new(bindings: Bindings, window: Duration, suppression: SuppressionPolicy) -> Self {
        let arms = bindings.keys().map(|key| (key, KeyArm::Never)).collect();
        Self {
            bindings,
            arms,
            window,
            suppression,
            phase: Phase::Idle,
        }
    }

    /// Evaluate one key press against the current selection.
    ///
    /// The selection is queried only for bound, unmodified presses while idle.
    /// A `Fired` decision moves the detector to `Phase::Busy`; call
    /// [`release`](Self::release) once the handler settles.
    pub fn on_key(&mut self, press: &KeyPress, selection: &dyn SelectionProvider) -> KeyDecision {
        let Some(action) = self.bindings.action_for(press.key) else {
            return KeyDecision::Ignored(IgnoreReason::Unbound);
        };
        if press.modifiers.has_command() {
            return KeyDecision::Ignored(IgnoreReason::Modifier);
        }
        if self.phase == Phase::Busy {
            return KeyDecision::Ignored(IgnoreReason::Busy);
        }

        let snapshot = selection.snapshot();
        let text = snapshot.trimmed();
        let typing = text.is_empty()
            || (self.suppression == SuppressionPolicy::UnlessEditableFocus
                && snapshot.is_editable_focus);
        if typing {
            self.arms.insert(press.key, KeyArm::Armed(press.at));
            return KeyDecision::Typed;
        }

        // Past this point the press is intercepted under either policy.
        let previous = self.arms.get(&press.key).copied().unwrap_or(KeyArm::Never);
        if !self.within_window(previous, press.at) {
            self.arms.insert(press.key, KeyArm::Armed(press.at));
            return KeyDecision::Armed { suppress: true };
        }

        self.arms.insert(press.key, KeyArm::Never);
        self.phase = Phase::Busy;
        KeyDecision::Fired {
            chord: Chord {
                key: press.key,
                action,
                text: text.to_string(),
                anchor: snapshot.bounding_rect,
            },
            suppress: true,
        }
    }

    fn within_window(&self, previous: KeyArm, at: Instant) -> bool {
        match previous {
            KeyArm::Never => false,
            KeyArm::Armed(since) => match at.checked_duration_since(since) {
                Some(delta) => !delta.is_zero() && delta < self.window,
                None => false,
            },
        }
    }

    /// Release the dispatch lock.
    pub fn release(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Forget every recorded press. The lock is left as is.
    pub fn reset_arms(&mut self) {
        for arm in self.arms.values_mut() {
            *arm = KeyArm::Never;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Busy
    }

    pub fn arm(&self, key: PhysicalKey) -> Option<KeyArm> {
        self.arms.get(&key).copied()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}
