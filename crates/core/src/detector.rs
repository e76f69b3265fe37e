//! The detector actor: one task that owns chord state, the dispatch lock and
//! the listener subscription.
//!
//! Responsibilities:
//! - Feed host key presses through [`ChordDetector`].
//! - Dispatch recognized chords to their handler, one at a time.
//! - Report processing/success/error/copied through the [`StatusSink`].
//! - Detach on navigation and re-attach after a delay, through the readiness
//!   gate when one is configured.
//! - Clear the status when the selection goes empty.
//!
//! Does NOT handle:
//! - Fading transient statuses (sinks consult [`Status::auto_clear`]).
//! - Cancelling an in-flight handler.
//!
//! Invariants:
//! - At most one handler is in flight; the lock is released only when it settles.
//! - Handler errors and panics become `Status::Error` and never reach the host.
//! - A navigation resets chord arms but not the dispatch lock.

use std::future::{Future, pending};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use selchord_config::{ActionId, DetectorSettings, PhysicalKey};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, Sleep};
use tracing::Instrument;
use uuid::Uuid;

use crate::binding::{BindingError, Bindings};
use crate::chord::{ChordDetector, KeyDecision};
use crate::dispatch::{Chord, HandlerRegistry, Outcome};
use crate::key::KeyPress;
use crate::listener::{HostEvent, ListenerHost, ListenerLifecycle};
use crate::metrics::{record_recognized, record_settled};
use crate::navigation::{NavigationReceiver, NavigationSignal};
use crate::readiness::{GateOutcome, ReadinessGate, ReadinessProbe};
use crate::selection::{Rect, SelectionProvider};
use crate::status::{Status, StatusSink};

/// A key press together with what the detector decided about it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyReport {
    pub press: KeyPress,
    pub decision: KeyDecision,
}

type AttachFuture = Pin<Box<dyn Future<Output = Option<GateOutcome>> + Send>>;

/// Builder for a running detector.
pub struct Detector {
    settings: DetectorSettings,
    bindings: Bindings,
    registry: HandlerRegistry,
    host: Arc<dyn ListenerHost>,
    selection: Arc<dyn SelectionProvider>,
    sink: Arc<dyn StatusSink>,
    readiness: Option<Arc<dyn ReadinessProbe>>,
    navigation: Option<NavigationReceiver>,
    reports: Option<mpsc::UnboundedSender<KeyReport>>,
}

impl Detector {
    pub fn new(
        settings: DetectorSettings,
        bindings: Bindings,
        registry: HandlerRegistry,
        host: Arc<dyn ListenerHost>,
        selection: Arc<dyn SelectionProvider>,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            settings,
            bindings,
            registry,
            host,
            selection,
            sink,
            readiness: None,
            navigation: None,
            reports: None,
        }
    }

    /// Gate attaches on `probe`. Only takes effect when the settings carry
    /// readiness timing.
    pub fn with_readiness(mut self, probe: Arc<dyn ReadinessProbe>) -> Self {
        self.readiness = Some(probe);
        self
    }

    /// Detach and re-attach whenever a signal arrives on `navigation`.
    pub fn with_navigation(mut self, navigation: NavigationReceiver) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Receive a [`KeyReport`] for every press the detector sees.
    pub fn with_key_reports(mut self, reports: mpsc::UnboundedSender<KeyReport>) -> Self {
        self.reports = Some(reports);
        self
    }

    /// Verify every bound action has a handler, attach (or schedule the
    /// gated attach) and spawn the actor.
    pub fn start(self) -> Result<DetectorHandle, BindingError> {
        self.bindings.ensure_handlers(&self.registry)?;

        let gate = match (self.settings.readiness, self.readiness) {
            (Some(settings), Some(probe)) => Some(ReadinessGate::new(settings, probe)),
            _ => None,
        };

        let mut lifecycle = ListenerLifecycle::new(self.host);
        let pending_attach = match &gate {
            Some(gate) => {
                let gate = gate.clone();
                Some(Box::pin(async move { Some(gate.wait().await) }) as AttachFuture)
            }
            None => {
                lifecycle.attach();
                None
            }
        };

        tracing::info!(
            bindings = self.bindings.len(),
            window_ms = self.settings.window.as_millis() as u64,
            gated = gate.is_some(),
            "Chord detector starting"
        );

        let actor = Actor {
            chord: ChordDetector::new(
                self.bindings,
                self.settings.window,
                self.settings.suppression,
            ),
            registry: self.registry,
            lifecycle,
            selection: self.selection,
            sink: self.sink,
            gate,
            reattach_delay: self.settings.reattach_delay,
            selection_clear_delay: self.settings.selection_clear_delay,
            navigation: self.navigation,
            reports: self.reports,
            in_flight: None,
            pending_attach,
            selection_check: None,
        };

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(actor.run(stop_rx));

        Ok(DetectorHandle {
            stop_tx: Some(stop_tx),
            task,
        })
    }
}

/// Handle to a running detector. Dropping it also stops the detector.
#[derive(Debug)]
pub struct DetectorHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl DetectorHandle {
    /// Detach listeners and wait for the actor to exit.
    ///
    /// An in-flight handler keeps running; its result is discarded.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!(error = %e, "Detector task ended abnormally");
        }
    }

    /// True once the actor has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

struct InFlight {
    key: PhysicalKey,
    action: ActionId,
    anchor: Option<Rect>,
    started: Instant,
    span: tracing::Span,
    task: JoinHandle<anyhow::Result<Outcome>>,
}

struct Actor {
    chord: ChordDetector,
    registry: HandlerRegistry,
    lifecycle: ListenerLifecycle<Arc<dyn ListenerHost>>,
    selection: Arc<dyn SelectionProvider>,
    sink: Arc<dyn StatusSink>,
    gate: Option<ReadinessGate>,
    reattach_delay: Duration,
    selection_clear_delay: Duration,
    navigation: Option<NavigationReceiver>,
    reports: Option<mpsc::UnboundedSender<KeyReport>>,
    in_flight: Option<InFlight>,
    pending_attach: Option<AttachFuture>,
    selection_check: Option<Pin<Box<Sleep>>>,
}

impl Actor {
    async fn run(mut self, mut stop_rx: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                biased;

                _ = &mut stop_rx => break,

                // Presses queued before the join result are judged while still busy.
                event = self.lifecycle.next_event() => match event {
                    Some(HostEvent::Key(press)) => self.on_key(press),
                    Some(HostEvent::SelectionChanged) => {
                        self.selection_check =
                            Some(Box::pin(tokio::time::sleep(self.selection_clear_delay)));
                    }
                    None => tracing::warn!("Listener host closed its subscription"),
                },

                result = join_in_flight(&mut self.in_flight) => self.on_settled(result),

                signal = recv_navigation(&mut self.navigation) => match signal {
                    Some(NavigationSignal) => self.on_navigation(),
                    None => self.navigation = None,
                },

                gated = maybe(&mut self.pending_attach) => {
                    self.pending_attach = None;
                    match gated {
                        Some(GateOutcome::Ready { attempts }) => {
                            tracing::debug!(attempts, "Host ready");
                        }
                        Some(GateOutcome::TimedOut { attempts }) => {
                            tracing::warn!(attempts, "Host never reported ready, attaching anyway");
                        }
                        None => {}
                    }
                    if self.lifecycle.reattach_if_needed() {
                        tracing::info!("Listeners re-attached");
                    }
                }

                () = maybe(&mut self.selection_check) => {
                    self.selection_check = None;
                    if self.selection.snapshot().is_empty() {
                        self.sink.clear();
                    }
                }

            }
        }

        self.lifecycle.detach();
        tracing::info!("Chord detector stopped");
    }

    fn on_key(&mut self, press: KeyPress) {
        let decision = self.chord.on_key(&press, self.selection.as_ref());
        tracing::trace!(key = %press.key, ?decision, "Key press");

        if let Some(reports) = &self.reports {
            let _ = reports.send(KeyReport {
                press,
                decision: decision.clone(),
            });
        }

        if let KeyDecision::Fired { chord, .. } = decision {
            self.dispatch(chord);
        }
    }

    fn dispatch(&mut self, chord: Chord) {
        let span = tracing::info_span!(
            "chord.dispatch",
            key = %chord.key,
            action = %chord.action,
            dispatch_id = %Uuid::new_v4(),
        );
        record_recognized(chord.action);

        let Some(handler) = self.registry.get(chord.action) else {
            span.in_scope(|| tracing::error!("No handler registered"));
            self.chord.release();
            self.sink.show(Status::Error, chord.anchor);
            return;
        };

        span.in_scope(|| tracing::info!(chars = chord.text.chars().count(), "Chord recognized"));
        self.sink.show(Status::Processing, chord.anchor);

        let task = tokio::spawn(handler.handle(chord.text).instrument(span.clone()));
        self.in_flight = Some(InFlight {
            key: chord.key,
            action: chord.action,
            anchor: chord.anchor,
            started: Instant::now(),
            span,
            task,
        });
    }

    fn on_settled(&mut self, result: Result<anyhow::Result<Outcome>, JoinError>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        let _guard = in_flight.span.enter();

        let status = match result {
            Ok(Ok(outcome)) => {
                tracing::info!(?outcome, "Handler finished");
                outcome.status()
            }
            Ok(Err(error)) => {
                tracing::error!(error = ?error, "Handler failed");
                Status::Error
            }
            Err(join_error) if join_error.is_panic() => {
                tracing::error!("Handler panicked");
                Status::Error
            }
            Err(join_error) => {
                tracing::error!(error = %join_error, "Handler task cancelled");
                Status::Error
            }
        };

        self.chord.release();
        record_settled(in_flight.action, status, in_flight.started.elapsed());

        let anchor = self
            .selection
            .snapshot()
            .bounding_rect
            .or(in_flight.anchor);
        tracing::debug!(key = %in_flight.key, %status, "Lock released");
        self.sink.show(status, anchor);
    }

    fn on_navigation(&mut self) {
        tracing::info!(
            reattach_ms = self.reattach_delay.as_millis() as u64,
            "Navigation detected, detaching listeners"
        );
        self.lifecycle.detach();
        self.sink.clear();
        self.chord.reset_arms();
        self.selection_check = None;

        let delay = self.reattach_delay;
        let gate = self.gate.clone();
        self.pending_attach = Some(Box::pin(async move {
            tokio::time::sleep(delay).await;
            match gate {
                Some(gate) => Some(gate.wait().await),
                None => None,
            }
        }));
    }
}

async fn maybe<F: Future + Unpin>(future: &mut Option<F>) -> F::Output {
    match future {
        Some(future) => future.await,
        None => pending().await,
    }
}

async fn join_in_flight(
    in_flight: &mut Option<InFlight>,
) -> Result<anyhow::Result<Outcome>, JoinError> {
    match in_flight {
        Some(in_flight) => (&mut in_flight.task).await,
        None => pending().await,
    }
}

async fn recv_navigation(navigation: &mut Option<NavigationReceiver>) -> Option<NavigationSignal> {
    match navigation {
        Some(rx) => rx.recv().await,
        None => pending().await,
    }
}
