mod common;

use common::{dashboard, run_until, FakeBackend};
use std::sync::Arc;
use std::time::Duration;
use threatscope::app::{ExplanationPanel, NoticeLevel};
use threatscope::domain::{Explanation, Severity, StatsSnapshot};
use threatscope::runtime::REMOTE_PANIC_MESSAGE;
use threatscope::{Event, SubmissionState};

fn completed(state: &threatscope::SessionState) -> bool {
    state.last_outcome == Some(SubmissionState::Completed) && state.control_enabled()
}

#[tokio::test(start_paused = true)]
async fn threat_submission_runs_every_step() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("' OR 1=1 --").unwrap();
    run_until(&mut dashboard, |state| completed(state) && state.confidence.current() == 85).await;

    assert_eq!(backend.classify_calls(), 1);
    assert_eq!(backend.explain_calls(), 1);
    assert_eq!(backend.stats_calls(), 1);

    let state = dashboard.state();
    let head = state.feed.head().unwrap();
    assert_eq!(head.category, "Threat Detected");
    assert_eq!(head.severity, Severity::High);
    assert_eq!(
        state.explanation,
        ExplanationPanel::Ready(Explanation::Text("Matches a known attack pattern".to_string()))
    );

    let frame = dashboard.surface().last();
    let result = frame.result.as_ref().unwrap();
    assert_eq!(result.badge, "THREAT DETECTED");
    assert_eq!(result.confidence, 85);
    assert!(frame.input.control_enabled);
}

#[tokio::test(start_paused = true)]
async fn safe_submission_settles_at_ninety_two() {
    let backend = Arc::new(FakeBackend::new("non-threat"));
    backend.set_stats(Ok(StatsSnapshot::new(1, 0, 1).unwrap()));
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("hello world").unwrap();
    run_until(&mut dashboard, |state| completed(state) && state.confidence.current() == 92).await;

    let head = dashboard.state().feed.head().unwrap();
    assert_eq!(head.category, "Safe Content");
    assert_eq!(head.severity, Severity::Low);
    assert_eq!(head.summary, "hello world");
}

#[tokio::test(start_paused = true)]
async fn gauge_climbs_monotonically_between_frames() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("<script>alert(1)</script>").unwrap();
    run_until(&mut dashboard, |state| completed(state) && state.confidence.is_settled()).await;

    let shown: Vec<u8> = dashboard
        .surface()
        .frames
        .iter()
        .filter_map(|frame| frame.result.as_ref().map(|result| result.confidence))
        .collect();
    assert!(shown.windows(2).all(|pair| pair[0] <= pair[1]), "{shown:?}");
    assert_eq!(shown.last(), Some(&85));
}

#[tokio::test(start_paused = true)]
async fn classifier_failure_skips_explain_and_refresh() {
    let backend = Arc::new(FakeBackend::new("threat"));
    backend.fail_classify("HTTP 500");
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("' OR 1=1 --").unwrap();
    run_until(&mut dashboard, |state| state.last_outcome == Some(SubmissionState::Failed)).await;

    assert_eq!(backend.explain_calls(), 0);
    assert_eq!(backend.stats_calls(), 0);

    let state = dashboard.state();
    assert!(state.control_enabled());
    assert!(state.feed.is_empty());
    assert!(state.verdict.is_none());
    assert!(state
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Error && n.message == "Analysis failed: HTTP 500"));
}

#[tokio::test(start_paused = true)]
async fn rapid_analyze_triggers_coalesce_into_one_submission() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let mut dashboard = dashboard(&backend);
    let handle = dashboard.handle();

    for text in ["DROP", "DROP TABLE", "DROP TABLE users;"] {
        handle.input(text).unwrap();
        handle.analyze().unwrap();
    }
    run_until(&mut dashboard, completed).await;

    assert_eq!(backend.classified_texts(), vec!["DROP TABLE users;".to_string()]);
    assert_eq!(dashboard.state().feed.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_while_in_flight_is_dropped() {
    let backend = Arc::new(FakeBackend::new("threat").gated());
    let mut dashboard = dashboard(&backend);

    dashboard.dispatch(&Event::Submit { text: "first".to_string() });
    dashboard.dispatch(&Event::Submit { text: "second".to_string() });
    assert_eq!(dashboard.state().submission, SubmissionState::InFlight);
    assert!(!dashboard.surface().last().input.control_enabled);

    backend.release();
    run_until(&mut dashboard, completed).await;

    assert_eq!(backend.classify_calls(), 1);
    assert_eq!(backend.classified_texts(), vec!["first".to_string()]);
    assert_eq!(dashboard.state().feed.head().unwrap().summary, "first");
}

#[tokio::test(start_paused = true)]
async fn explainer_failure_only_touches_its_panel() {
    let backend = Arc::new(FakeBackend::new("threat"));
    backend.fail_explain("model offline");
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("' OR 1=1 --").unwrap();
    run_until(&mut dashboard, completed).await;

    let state = dashboard.state();
    assert_eq!(
        state.explanation,
        ExplanationPanel::Ready(Explanation::Error("Error: model offline".to_string()))
    );
    assert!(state.verdict.as_ref().unwrap().verdict.kind.is_threat());
    assert_eq!(state.feed.len(), 1);
    assert_eq!(state.stats, Some(StatsSnapshot::new(1, 1, 0).unwrap()));
}

#[tokio::test(start_paused = true)]
async fn stats_failure_keeps_last_snapshot() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let snapshot = StatsSnapshot::new(3, 2, 1).unwrap();
    backend.set_stats(Ok(snapshot));
    let mut dashboard = dashboard(&backend);

    dashboard.handle().refresh_stats().unwrap();
    run_until(&mut dashboard, |state| state.stats == Some(snapshot)).await;
    assert!(dashboard
        .state()
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Success && n.message == "Data refreshed"));

    backend.set_stats(Err("HTTP 503"));
    dashboard.handle().submit("x").unwrap();
    run_until(&mut dashboard, completed).await;

    let state = dashboard.state();
    assert_eq!(state.stats, Some(snapshot));
    assert_eq!(state.charts.distribution().values(), &[2, 1]);
    assert_eq!(state.feed.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn counters_count_up_to_the_snapshot() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let snapshot = StatsSnapshot::new(120, 45, 75).unwrap();
    backend.set_stats(Ok(snapshot));
    let mut dashboard = dashboard(&backend);

    dashboard.handle().refresh_stats().unwrap();
    run_until(&mut dashboard, |state| state.counters.displayed() == snapshot).await;

    let cards = &dashboard.surface().last().stat_cards;
    assert_eq!((cards.total, cards.threats, cards.safe), (120, 45, 75));
}

#[tokio::test(start_paused = true)]
async fn background_start_seeds_feed_and_loads_stats() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let mut dashboard = dashboard(&backend);

    dashboard.start_background();
    run_until(&mut dashboard, |state| !state.feed.is_empty() && state.stats.is_some()).await;

    assert_eq!(backend.stats_calls(), 1);
    assert!(dashboard.state().feed.len() <= threatscope::feed::FEED_CAPACITY);
    assert!(!dashboard.surface().frames.is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_ends_the_run_loop() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let mut dashboard = dashboard(&backend);
    dashboard.start_background();

    dashboard.handle().shutdown().unwrap();
    dashboard.run().await.unwrap();

    assert!(!dashboard.is_running());
}

#[tokio::test(start_paused = true)]
async fn crashed_explainer_still_returns_to_idle() {
    let backend = Arc::new(FakeBackend::new("threat"));
    backend.crash_explain(true);
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("x").unwrap();
    run_until(&mut dashboard, completed).await;
    assert_eq!(
        dashboard.state().explanation,
        ExplanationPanel::Ready(Explanation::Error(format!("Error: {REMOTE_PANIC_MESSAGE}")))
    );

    backend.crash_explain(false);
    dashboard.handle().submit("second").unwrap();
    run_until(&mut dashboard, |state| completed(state) && state.feed.len() == 2).await;

    assert_eq!(backend.classified_texts(), vec!["x".to_string(), "second".to_string()]);
    assert_eq!(dashboard.state().feed.head().unwrap().summary, "second");
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_gauge_and_counters() {
    let backend = Arc::new(FakeBackend::new("threat"));
    let mut dashboard = dashboard(&backend);

    dashboard.handle().submit("' OR 1=1 --").unwrap();
    run_until(&mut dashboard, |state| {
        completed(state) && state.confidence.current() > 0 && !state.confidence.is_settled()
    })
    .await;
    assert!(dashboard.is_animating());

    dashboard.handle().teardown().unwrap();
    run_until(&mut dashboard, |state| state.confidence.target() == 0).await;
    assert!(!dashboard.is_animating());

    let drained = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            dashboard.step().await;
        }
    })
    .await;
    assert!(drained.is_err());

    let state = dashboard.state();
    assert_eq!(state.confidence.current(), 0);
    assert_eq!(state.counters.displayed(), StatsSnapshot::new(1, 1, 0).unwrap());
}
