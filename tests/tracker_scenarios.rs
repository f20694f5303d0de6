use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use threatmodel::enums::analysis_status::AnalysisStatus;
use threatmodel::enums::tracker_state::TrackerState;
use threatmodel::errors::ClientError;
use threatmodel::services::analysis_tracker::{AnalysisTracker, CANCELLED_REASON, NO_FILE_MESSAGE, SUBMISSION_CANCELLED};
use threatmodel::structs::tracker_options::TrackerOptions;
use crate::support::fake_api::FakeApi;
use crate::support::fixtures::{self, ANALYSIS_ID};

fn options(max_transient_failures: u32) -> TrackerOptions {
    TrackerOptions {
        poll_interval: Duration::from_secs(2),
        max_transient_failures,
        max_upload_size_mb: 10,
    }
}

fn tracker(api: FakeApi, max_transient_failures: u32) -> (Arc<FakeApi>, AnalysisTracker<FakeApi>) {
    let api = Arc::new(api);
    let tracker = AnalysisTracker::new(Arc::clone(&api), options(max_transient_failures));
    (api, tracker)
}

fn network_down() -> ClientError {
    ClientError::network_error("fetch analysis detail", None, "connection refused")
}

#[tokio::test(start_paused = true)]
async fn created_then_processing_twice_then_analyzed_resolves_after_three_calls() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Created)))
        .on_detail(vec![
            Ok(fixtures::detail(AnalysisStatus::Processing)),
            Ok(fixtures::detail(AnalysisStatus::Processing)),
            Ok(fixtures::detail(AnalysisStatus::Analyzed)),
        ]);
    let (api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let started = tokio::time::Instant::now();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    match &state {
        TrackerState::Resolved { detail } => {
            assert_eq!(detail.status, AnalysisStatus::Analyzed);
            assert_eq!(detail.result.as_ref().map(|r| r.threat_count), Some(1));
        }
        other => panic!("expected resolved, got {:?}", other),
    }
    assert_eq!(tracker.resolver_calls(), 3);
    assert_eq!(FakeApi::calls(&api.detail_calls), 3);
    // The CREATED acknowledgement waits one interval before the first check.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(6) && elapsed < Duration::from_secs(8), "took {:?}", elapsed);
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn create_without_file_fails_without_network_call() {
    let api = FakeApi::new().on_create(Ok(fixtures::created(AnalysisStatus::Created)));
    let (api, tracker) = tracker(api, 5);

    let error = tracker.create().await.unwrap_err();

    assert!(matches!(error, ClientError::ValidationError { ref field, .. } if field == "file"));
    assert_eq!(FakeApi::calls(&api.create_calls), 0);
    assert_eq!(tracker.state(), TrackerState::Idle { error: Some(NO_FILE_MESSAGE.to_string()) });
}

#[tokio::test(start_paused = true)]
async fn failed_analysis_surfaces_server_message_and_stops() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![Ok(fixtures::detail(AnalysisStatus::Failed))]);
    let (api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    assert_eq!(
        state,
        TrackerState::Failed {
            analysis_id: ANALYSIS_ID.to_string(),
            message: "model timeout".to_string(),
        }
    );
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(FakeApi::calls(&api.detail_calls), 1);
}

#[tokio::test]
async fn create_transport_failure_returns_to_idle_with_message() {
    let api = FakeApi::new().on_create(Err(ClientError::timeout("create analysis", 120, true)));
    let (api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let error = tracker.create().await.unwrap_err();

    assert!(matches!(error, ClientError::Timeout { long_running: true, .. }));
    assert_eq!(
        tracker.state().error_message(),
        Some("Request timed out. The analysis is taking longer than expected.")
    );
    assert!(tracker.staged_file().is_some());
    assert_eq!(FakeApi::calls(&api.create_calls), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_exhaust_budget_and_abandon() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![Err(network_down())]);
    let (api, tracker) = tracker(api, 3);

    tracker.stage_file(fixtures::png()).unwrap();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    match state {
        TrackerState::Abandoned { analysis_id, reason } => {
            assert_eq!(analysis_id, ANALYSIS_ID);
            assert!(reason.starts_with("Connection lost"), "reason was {}", reason);
        }
        other => panic!("expected abandoned, got {:?}", other),
    }
    assert_eq!(FakeApi::calls(&api.detail_calls), 3);
}

#[tokio::test(start_paused = true)]
async fn a_success_resets_the_failure_budget() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![
            Err(network_down()),
            Err(ClientError::server_error(Some(503), "Service Unavailable", None)),
            Ok(fixtures::detail(AnalysisStatus::Processing)),
            Err(network_down()),
            Err(network_down()),
            Ok(fixtures::detail(AnalysisStatus::Analyzed)),
        ]);
    let (_api, tracker) = tracker(api, 3);

    tracker.stage_file(fixtures::png()).unwrap();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    assert!(matches!(state, TrackerState::Resolved { .. }));
    assert_eq!(tracker.resolver_calls(), 6);
}

#[tokio::test(start_paused = true)]
async fn missing_analysis_abandons_immediately() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![Err(ClientError::not_found("Analysis", ANALYSIS_ID))]);
    let (api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    assert!(matches!(state, TrackerState::Abandoned { .. }));
    assert!(state.error_message().unwrap().contains("not found"));
    assert_eq!(FakeApi::calls(&api.detail_calls), 1);
}

#[tokio::test(start_paused = true)]
async fn inconsistent_record_abandons() {
    let mut broken = fixtures::detail(AnalysisStatus::Processing);
    broken.result = Some(fixtures::report());
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![Ok(broken)]);
    let (_api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    assert!(state.error_message().unwrap().contains("inconsistent"));
}

#[tokio::test(start_paused = true)]
async fn status_regression_is_ignored() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![
            Ok(fixtures::detail(AnalysisStatus::Processing)),
            Ok(fixtures::detail(AnalysisStatus::Created)),
            Ok(fixtures::detail(AnalysisStatus::Analyzed)),
        ]);
    let (_api, tracker) = tracker(api, 5);
    let mut updates = tracker.subscribe();

    tracker.stage_file(fixtures::png()).unwrap();
    tracker.create().await.unwrap();
    updates.borrow_and_update();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            let done = state.is_terminal();
            if let TrackerState::Polling { status, .. } = state {
                seen.push(status);
            }
            if done {
                break;
            }
        }
        seen
    });

    let state = tracker.track(CancellationToken::new()).await.unwrap();
    assert!(matches!(state, TrackerState::Resolved { .. }));
    assert_eq!(tracker.resolver_calls(), 3);

    let seen = watcher.await.unwrap();
    assert!(!seen.contains(&AnalysisStatus::Created));
}

#[tokio::test(start_paused = true)]
async fn second_submission_is_rejected_while_polling_and_cancel_abandons() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Created)))
        .on_detail(vec![Ok(fixtures::detail(AnalysisStatus::Processing))]);
    let (_api, tracker) = tracker(api, 5);
    let tracker = Arc::new(tracker);

    tracker.stage_file(fixtures::png()).unwrap();
    tracker.create().await.unwrap();

    let cancel = CancellationToken::new();
    let task = {
        let tracker = Arc::clone(&tracker);
        let cancel = cancel.clone();
        tokio::spawn(async move { tracker.track(cancel).await })
    };

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(tracker.state().is_busy());

    let error = tracker.create().await.unwrap_err();
    assert!(matches!(error, ClientError::ValidationError { ref field, .. } if field == "state"));
    assert!(tracker.reset().is_err());

    cancel.cancel();
    let state = task.await.unwrap().unwrap();
    assert_eq!(
        state,
        TrackerState::Abandoned {
            analysis_id: ANALYSIS_ID.to_string(),
            reason: CANCELLED_REASON.to_string(),
        }
    );

    tracker.reset().unwrap();
    assert_eq!(tracker.state(), TrackerState::default());
}

#[tokio::test(start_paused = true)]
async fn dropping_track_future_frees_the_tracker() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Created)))
        .on_detail(vec![Ok(fixtures::detail(AnalysisStatus::Processing))]);
    let (_api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    tracker.create().await.unwrap();
    let timed_out = tokio::time::timeout(Duration::from_secs(5), tracker.track(CancellationToken::new())).await;

    assert!(timed_out.is_err());
    assert_eq!(
        tracker.state(),
        TrackerState::Abandoned {
            analysis_id: ANALYSIS_ID.to_string(),
            reason: CANCELLED_REASON.to_string(),
        }
    );
    tracker.reset().unwrap();
    assert_eq!(tracker.state(), TrackerState::default());
}

#[tokio::test(start_paused = true)]
async fn dropping_create_future_returns_to_idle() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Created)))
        .with_create_delay(Duration::from_secs(60));
    let (api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let timed_out = tokio::time::timeout(Duration::from_secs(1), tracker.create()).await;

    assert!(timed_out.is_err());
    assert_eq!(FakeApi::calls(&api.create_calls), 1);
    assert_eq!(tracker.state().error_message(), Some(SUBMISSION_CANCELLED));
    assert!(tracker.state().is_idle());
    assert!(tracker.staged_file().is_some());
}

#[tokio::test(start_paused = true)]
async fn terminal_acknowledgement_defers_to_detail_record() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Analyzed)))
        .on_detail(vec![
            Ok(fixtures::detail(AnalysisStatus::Processing)),
            Ok(fixtures::detail(AnalysisStatus::Analyzed)),
        ]);
    let (api, tracker) = tracker(api, 5);

    tracker.stage_file(fixtures::png()).unwrap();
    let started = tokio::time::Instant::now();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    assert!(matches!(state, TrackerState::Resolved { .. }), "got {:?}", state);
    assert_eq!(FakeApi::calls(&api.detail_calls), 2);
    // First check is immediate, the second one interval later.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(4), "took {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn repeated_regressions_exhaust_budget_and_abandon() {
    let api = FakeApi::new()
        .on_create(Ok(fixtures::created(AnalysisStatus::Processing)))
        .on_detail(vec![Ok(fixtures::detail(AnalysisStatus::Created))]);
    let (api, tracker) = tracker(api, 3);

    tracker.stage_file(fixtures::png()).unwrap();
    let state = tracker.submit_and_track(CancellationToken::new()).await.unwrap();

    match state {
        TrackerState::Abandoned { reason, .. } => assert!(reason.contains("went back"), "reason was {}", reason),
        other => panic!("expected abandoned, got {:?}", other),
    }
    assert_eq!(FakeApi::calls(&api.detail_calls), 3);
    assert!(tracker.reset().is_ok());
}
