//! Property tests for the coordinator invariants.

use agw_feedback::{
    Coordinator, EventDetail, FeedbackSettings, LifecycleEvent, ProgressIndicator, SwapPolicy,
    XhrSnapshot,
};
use proptest::prelude::*;

fn event_strategy() -> impl Strategy<Value = LifecycleEvent> {
    prop::sample::select(LifecycleEvent::ALL.to_vec())
}

fn policy_strategy() -> impl Strategy<Value = SwapPolicy> {
    prop::sample::select(vec![
        SwapPolicy::OkOnly,
        SwapPolicy::AboveOk,
        SwapPolicy::NonSuccess,
    ])
}

proptest! {
    #[test]
    fn swap_decision_matches_policy(status in 100u16..600, policy in policy_strategy()) {
        let mut settings = FeedbackSettings::default();
        settings.swap.policy = policy;
        let mut coordinator = Coordinator::with_settings(settings);
        let xhr = XhrSnapshot::with_status(status).body(r#"{"error":"boom"}"#);
        let mut detail = EventDetail::new(&xhr);

        coordinator.handle(LifecycleEvent::BeforeSwap, &mut detail);

        prop_assert_eq!(detail.should_swap, !policy.suppresses(status));
        prop_assert_eq!(coordinator.toasts().len(), usize::from(policy.suppresses(status)));
    }

    #[test]
    fn status_200_is_never_suppressed(body in ".*", policy in policy_strategy()) {
        let mut settings = FeedbackSettings::default();
        settings.swap.policy = policy;
        let mut coordinator = Coordinator::with_settings(settings);
        let xhr = XhrSnapshot::with_status(200).body(body);
        let mut detail = EventDetail::new(&xhr);

        coordinator.handle(LifecycleEvent::BeforeSwap, &mut detail);

        prop_assert!(detail.should_swap);
        prop_assert!(coordinator.toasts().is_empty());
    }

    #[test]
    fn arbitrary_bodies_never_panic(status in 201u16..600, body in ".*") {
        let mut coordinator = Coordinator::with_settings(FeedbackSettings::default());
        let xhr = XhrSnapshot::with_status(status).body(body);
        let mut detail = EventDetail::new(&xhr);

        let reaction = coordinator.handle(LifecycleEvent::BeforeSwap, &mut detail);

        prop_assert!(reaction.is_swap_suppressed());
        prop_assert!(coordinator.toasts().len() <= 1);
    }

    #[test]
    fn progress_transitions_stay_balanced(
        events in prop::collection::vec((event_strategy(), any::<bool>()), 0..64)
    ) {
        let mut coordinator = Coordinator::with_settings(FeedbackSettings::default());
        let mut network_errors = 0usize;
        for (event, redirect) in events {
            let mut xhr = XhrSnapshot::with_status(200);
            if redirect {
                xhr = xhr.header("HX-Location", "/next");
            }
            if event == LifecycleEvent::SendError {
                network_errors += 1;
            }
            let mut detail = EventDetail::new(&xhr);
            coordinator.handle(event, &mut detail);

            let bar = coordinator.progress();
            let open = bar.starts() - bar.completions();
            prop_assert!(open <= 1);
            prop_assert_eq!(bar.is_started(), open == 1);
        }
        prop_assert_eq!(coordinator.toasts().len(), network_errors);
    }
}
