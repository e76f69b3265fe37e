//! Property-based tests for chord recognition timing.
//!
//! Test coverage:
//! - A second press fires exactly when the gap is inside the open window
//! - While busy, further presses never fire
//! - Blank selections are always plain typing

use std::time::{Duration, Instant};

use proptest::prelude::*;
use selchord_config::{ActionId, BindingSpec, PhysicalKey, SuppressionPolicy};
use selchord_core::{
    Bindings, ChordDetector, KeyDecision, KeyPress, SelectionSnapshot, SharedSelection,
};

const WINDOW_MS: u64 = 400;

fn detector(policy: SuppressionPolicy) -> ChordDetector {
    let bindings = Bindings::new([BindingSpec {
        key: PhysicalKey::Letter('J'),
        action: ActionId::TranslateJapanese,
    }])
    .unwrap();
    ChordDetector::new(bindings, Duration::from_millis(WINDOW_MS), policy)
}

fn policy() -> impl Strategy<Value = SuppressionPolicy> {
    prop_oneof![
        Just(SuppressionPolicy::Always),
        Just(SuppressionPolicy::UnlessEditableFocus),
    ]
}

proptest! {
    #[test]
    fn prop_fires_iff_gap_inside_window(gap_ms in 0u64..1000, policy in policy()) {
        let mut detector = detector(policy);
        let selection = SharedSelection::new(SelectionSnapshot::text("hello"));
        let base = Instant::now();
        let key = PhysicalKey::Letter('J');

        let first = detector.on_key(&KeyPress::new(key, base), &selection);
        prop_assert_eq!(first, KeyDecision::Armed { suppress: true });

        let second = detector.on_key(
            &KeyPress::new(key, base + Duration::from_millis(gap_ms)),
            &selection,
        );
        let fired = matches!(second, KeyDecision::Fired { .. });
        prop_assert_eq!(fired, gap_ms > 0 && gap_ms < WINDOW_MS);
        prop_assert_eq!(detector.is_busy(), fired);
    }

    #[test]
    fn prop_never_more_than_one_fire_while_busy(gaps in prop::collection::vec(1u64..WINDOW_MS, 1..20)) {
        let mut detector = detector(SuppressionPolicy::Always);
        let selection = SharedSelection::new(SelectionSnapshot::text("hello"));
        let key = PhysicalKey::Letter('J');
        let mut at = Instant::now();
        let mut fired = 0;

        detector.on_key(&KeyPress::new(key, at), &selection);
        for gap in gaps {
            at += Duration::from_millis(gap);
            let decision = detector.on_key(&KeyPress::new(key, at), &selection);
            if matches!(decision, KeyDecision::Fired { .. }) {
                fired += 1;
            }
        }

        prop_assert_eq!(fired, 1);
    }

    #[test]
    fn prop_empty_selection_never_fires(
        gaps in prop::collection::vec(0u64..1000, 1..20),
        blank in "[ \t\n]{0,4}",
    ) {
        let mut detector = detector(SuppressionPolicy::Always);
        let selection = SharedSelection::new(SelectionSnapshot::text(blank));
        let key = PhysicalKey::Letter('J');
        let mut at = Instant::now();

        for gap in gaps {
            at += Duration::from_millis(gap);
            let decision = detector.on_key(&KeyPress::new(key, at), &selection);
            prop_assert_eq!(&decision, &KeyDecision::Typed);
            prop_assert!(!decision.suppresses_default());
        }
    }
}
