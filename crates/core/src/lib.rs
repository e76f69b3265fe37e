//! Double-press chord detection over selected text.
//!
//! A detector watches physical key presses from a [`ListenerHost`]. When the
//! same bound key is pressed twice within the configured window while text is
//! selected, the bound [`ChordHandler`] runs with that text. Progress and
//! results are reported through a [`StatusSink`].
//!
//! Responsibilities:
//! - The pure recognition state machine ([`ChordDetector`]).
//! - The async actor that owns listeners, dispatch and re-attachment ([`Detector`]).
//! - Host-facing traits for selection, status, readiness and location.
//!
//! Does NOT handle:
//! - What handlers do (see the client crate and the CLI).
//! - Rendering statuses or reading real input devices (hosts do that).

pub mod binding;
pub mod chord;
pub mod detector;
pub mod dispatch;
pub mod key;
pub mod listener;
pub mod metrics;
pub mod navigation;
pub mod readiness;
pub mod selection;
pub mod status;

pub use binding::{BindingError, Bindings};
pub use chord::{ChordDetector, IgnoreReason, KeyArm, KeyDecision, Phase};
pub use detector::{Detector, DetectorHandle, KeyReport};
pub use dispatch::{Chord, ChordHandler, HandlerRegistry, Outcome};
pub use key::{KeyPress, Modifiers};
pub use listener::{EventHub, HostEvent, ListenerHost, ListenerLifecycle, Subscription};
pub use navigation::{
    LocationProbe, LocationWatcher, NavigationReceiver, NavigationSender, NavigationSignal,
    navigation_channel,
};
pub use readiness::{GateOutcome, ReadinessGate, ReadinessProbe};
pub use selection::{Rect, SelectionProvider, SelectionSnapshot, SharedSelection};
pub use status::{Status, StatusEvent, StatusLog, StatusSink};
