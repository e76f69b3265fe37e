//! Chord recognition and dispatch through a running detector.

mod common;

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::*;
use selchord_core::{BindingError, IgnoreReason, KeyDecision, KeyReport};
use tokio::sync::{mpsc, oneshot};

const TJ: ActionId = ActionId::TranslateJapanese;
const TC: ActionId = ActionId::TranslateChinese;

fn translation_registry(h: &Harness) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register(TJ, recorder(h.calls.clone(), TJ, Outcome::Success))
        .register(TC, recorder(h.calls.clone(), TC, Outcome::Success));
    registry
}

#[tokio::test(start_paused = true)]
async fn test_translation_scenario() {
    let h = Harness::new();
    h.select("hello");
    let handle = h
        .detector(
            DetectorSettings::default(),
            bindings(&[('J', TJ), ('C', TC)]),
            translation_registry(&h),
        )
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 250);
    settle().await;

    assert_eq!(h.calls(), vec![(TJ, "hello".to_string())]);
    assert_eq!(h.log.shown(), vec![Status::Processing, Status::Success]);

    h.press('C', 1000);
    h.press('C', 1500);
    settle().await;

    assert_eq!(h.calls().len(), 1);
    assert_eq!(h.log.shown().len(), 2);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_handler_receives_trimmed_selection() {
    let h = Harness::new();
    h.select("  \n hello world \t ");
    let handle = h
        .detector(
            DetectorSettings::default(),
            bindings(&[('J', TJ), ('C', TC)]),
            translation_registry(&h),
        )
        .start()
        .unwrap();

    h.press('C', 0);
    h.press('C', 100);
    settle().await;

    assert_eq!(h.calls(), vec![(TC, "hello world".to_string())]);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_at_most_one_handler_in_flight() {
    let h = Harness::new();
    h.select("hello");

    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let invocations = Arc::new(AtomicUsize::new(0));

    let mut registry = HandlerRegistry::new();
    {
        let (active, peak, invocations) = (active.clone(), peak.clone(), invocations.clone());
        registry.register(TJ, move |_text: String| {
            let (active, peak, invocations) = (active.clone(), peak.clone(), invocations.clone());
            async move {
                invocations.fetch_add(1, Ordering::SeqCst);
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(300)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                anyhow::Ok(Outcome::Success)
            }
        });
    }

    let handle = h
        .detector(DetectorSettings::default(), bindings(&[('J', TJ)]), registry)
        .start()
        .unwrap();

    // Fires at 100; every press until the handler settles is dropped.
    for at in [0, 100, 150, 200, 250, 300] {
        h.press('J', at);
    }
    settle().await;
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert_eq!(h.log.shown(), vec![Status::Processing]);

    advance_and_settle(Duration::from_millis(300)).await;
    assert_eq!(h.log.shown(), vec![Status::Processing, Status::Success]);

    h.press('J', 2000);
    h.press('J', 2100);
    settle().await;
    advance_and_settle(Duration::from_millis(300)).await;

    assert_eq!(invocations.load(Ordering::SeqCst), 2);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_press_queued_with_settlement_is_still_busy() {
    let h = Harness::new();
    h.select("hello");

    let (done_tx, done_rx) = oneshot::channel::<()>();
    let done_rx = Arc::new(Mutex::new(Some(done_rx)));
    let mut registry = HandlerRegistry::new();
    registry.register(TJ, move |_text: String| {
        let done_rx = done_rx.lock().unwrap().take();
        async move {
            if let Some(done_rx) = done_rx {
                let _ = done_rx.await;
            }
            anyhow::Ok(Outcome::Success)
        }
    });
    let (tx, mut rx) = mpsc::unbounded_channel::<KeyReport>();

    let handle = h
        .detector(DetectorSettings::default(), bindings(&[('J', TJ)]), registry)
        .with_key_reports(tx)
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    settle().await;
    assert_eq!(h.log.shown(), vec![Status::Processing]);

    // The handler finishes and a press arrives before the detector runs again.
    done_tx.send(()).unwrap();
    h.press('J', 200);
    settle().await;
    assert_eq!(h.log.shown(), vec![Status::Processing, Status::Success]);

    h.press('J', 300);
    settle().await;

    let decisions: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|report| report.decision)
        .collect();
    assert_eq!(decisions.len(), 4);
    assert!(matches!(decisions[1], KeyDecision::Fired { .. }));
    assert_eq!(decisions[2], KeyDecision::Ignored(IgnoreReason::Busy));
    assert_eq!(decisions[3], KeyDecision::Armed { suppress: true });
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_rejection_releases_lock() {
    let h = Harness::new();
    h.select("hello");

    let attempts = Arc::new(AtomicUsize::new(0));
    let mut registry = HandlerRegistry::new();
    {
        let attempts = attempts.clone();
        registry.register(TJ, move |_text: String| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    anyhow::bail!("upstream unavailable");
                }
                Ok(Outcome::Success)
            }
        });
    }

    let handle = h
        .detector(DetectorSettings::default(), bindings(&[('J', TJ)]), registry)
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    settle().await;
    h.press('J', 1000);
    h.press('J', 1100);
    settle().await;

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(
        h.log.shown(),
        vec![
            Status::Processing,
            Status::Error,
            Status::Processing,
            Status::Success
        ]
    );
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_panic_releases_lock() {
    let h = Harness::new();
    h.select("hello");

    let attempts = Arc::new(AtomicUsize::new(0));
    let mut registry = HandlerRegistry::new();
    {
        let attempts = attempts.clone();
        registry.register(TJ, move |_text: String| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if true {
                    panic!("handler bug");
                }
                anyhow::Ok(Outcome::Success)
            }
        });
    }

    let handle = h
        .detector(DetectorSettings::default(), bindings(&[('J', TJ)]), registry)
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    settle().await;
    h.press('J', 1000);
    h.press('J', 1100);
    settle().await;

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(
        h.log.shown(),
        vec![
            Status::Processing,
            Status::Error,
            Status::Processing,
            Status::Error
        ]
    );
    assert!(!handle.is_finished());
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_copied_outcome_reported() {
    let h = Harness::new();
    h.select("question");
    let action = ActionId::InternalQuestion;
    let mut registry = HandlerRegistry::new();
    registry.register(action, recorder(h.calls.clone(), action, Outcome::Copied));

    let handle = h
        .detector(
            DetectorSettings::for_variant(Variant::Hosted),
            bindings(&[('E', action)]),
            registry,
        )
        .start()
        .unwrap();

    h.press('E', 0);
    h.press('E', 200);
    settle().await;

    assert_eq!(h.log.shown(), vec![Status::Processing, Status::Copied]);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_selection_never_fires() {
    let h = Harness::new();
    let handle = h
        .detector(
            DetectorSettings::default(),
            bindings(&[('J', TJ), ('C', TC)]),
            translation_registry(&h),
        )
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    h.select("   ");
    h.press('J', 150);
    settle().await;

    assert!(h.calls().is_empty());
    assert!(h.log.events().is_empty());
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_general_variant_ignores_editable_focus() {
    let h = Harness::new();
    h.selection
        .set(SelectionSnapshot::text("hello").in_editable());
    let (tx, mut rx) = mpsc::unbounded_channel::<KeyReport>();

    let handle = h
        .detector(
            DetectorSettings::for_variant(Variant::General),
            bindings(&[('J', TJ), ('C', TC)]),
            translation_registry(&h),
        )
        .with_key_reports(tx)
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    settle().await;

    assert!(h.calls().is_empty());
    for _ in 0..2 {
        let report = rx.try_recv().unwrap();
        assert_eq!(report.decision, KeyDecision::Typed);
        assert!(!report.decision.suppresses_default());
    }
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_hosted_variant_fires_in_editable_focus() {
    let h = Harness::new();
    h.selection
        .set(SelectionSnapshot::text("こんにちは").in_editable());
    let action = ActionId::ImproveJapanese;
    let mut registry = HandlerRegistry::new();
    registry.register(action, recorder(h.calls.clone(), action, Outcome::Success));
    let (tx, mut rx) = mpsc::unbounded_channel::<KeyReport>();

    let handle = h
        .detector(
            DetectorSettings::for_variant(Variant::Hosted),
            bindings(&[('J', action)]),
            registry,
        )
        .with_key_reports(tx)
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    settle().await;

    assert_eq!(h.calls(), vec![(action, "こんにちは".to_string())]);
    let first = rx.try_recv().unwrap();
    assert_eq!(first.decision, KeyDecision::Armed { suppress: true });
    let second = rx.try_recv().unwrap();
    assert!(matches!(second.decision, KeyDecision::Fired { suppress: true, .. }));
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_start_rejects_missing_handler() {
    let h = Harness::new();
    let mut registry = HandlerRegistry::new();
    registry.register(TJ, recorder(h.calls.clone(), TJ, Outcome::Success));

    let result = h
        .detector(
            DetectorSettings::default(),
            bindings(&[('J', TJ), ('C', TC)]),
            registry,
        )
        .start();

    assert_eq!(
        result.err(),
        Some(BindingError::MissingHandler { action: TC })
    );
    assert_eq!(h.hub.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_handler_in_flight() {
    let h = Harness::new();
    h.select("hello");
    let mut registry = HandlerRegistry::new();
    registry.register(TJ, |_text: String| async {
        tokio::time::sleep(Duration::from_secs(10)).await;
        anyhow::Ok(Outcome::Success)
    });

    let handle = h
        .detector(DetectorSettings::default(), bindings(&[('J', TJ)]), registry)
        .start()
        .unwrap();

    h.press('J', 0);
    h.press('J', 100);
    settle().await;

    handle.stop().await;
    assert_eq!(h.hub.listener_count(), 0);

    advance_and_settle(Duration::from_secs(10)).await;
    assert_eq!(h.log.shown(), vec![Status::Processing]);
}
