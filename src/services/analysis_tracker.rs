use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use crate::enums::analysis_status::AnalysisStatus;
use crate::enums::tracker_state::TrackerState;
use crate::errors::{ClientError, ClientResult};
use crate::services::status_resolver::{PollOutcome, ResolveError, StatusResolver};
use crate::structs::analysis::analysis_created::AnalysisCreated;
use crate::structs::staged_file::StagedFile;
use crate::structs::tracker_options::TrackerOptions;
use crate::traits::threat_modeling_api::ThreatModelingApi;

pub const NO_FILE_MESSAGE: &str = "Select a file first";
pub const CANCELLED_REASON: &str = "Tracking cancelled";
pub const SUBMISSION_CANCELLED: &str = "Submission cancelled";

/// Owns one analysis submission: `Idle -> Submitting -> Created -> Polling ->
/// {Resolved | Failed}`. All transitions go through the methods below and
/// are published on a watch channel for the UI.
pub struct AnalysisTracker<A: ThreatModelingApi> {
    api: Arc<A>,
    resolver: StatusResolver<A>,
    options: TrackerOptions,
    staged: Mutex<Option<StagedFile>>,
    state: watch::Sender<TrackerState>,
}

impl<A: ThreatModelingApi> AnalysisTracker<A> {
    pub fn new(api: Arc<A>, options: TrackerOptions) -> Self {
        let (state, _) = watch::channel(TrackerState::default());
        Self {
            resolver: StatusResolver::new(Arc::clone(&api)),
            api,
            options,
            staged: Mutex::new(None),
            state,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackerState> {
        self.state.subscribe()
    }

    pub fn resolver_calls(&self) -> usize {
        self.resolver.calls()
    }

    pub fn staged_file(&self) -> Option<StagedFile> {
        self.staged_guard().clone()
    }

    pub fn stage_file(&self, file: StagedFile) -> ClientResult<()> {
        if !self.state.borrow().is_idle() {
            return Err(self.busy_error());
        }
        log::debug!("📎 Staged {} ({} bytes)", file.file_name, file.size());
        *self.staged_guard() = Some(file);
        self.update_if_idle(None);
        Ok(())
    }

    pub fn clear_file(&self) {
        *self.staged_guard() = None;
    }

    /// Submits the staged file. At most one submission may be outstanding;
    /// calls outside `Idle` are rejected. A transport failure puts the
    /// tracker back in `Idle` with the message.
    pub async fn create(&self) -> ClientResult<AnalysisCreated> {
        if !self.state.borrow().is_idle() {
            return Err(self.busy_error());
        }

        let Some(file) = self.staged_file() else {
            let error = ClientError::validation_error("file", "", "no file staged", Some(NO_FILE_MESSAGE));
            self.update_if_idle(Some(NO_FILE_MESSAGE.to_string()));
            return Err(error);
        };

        if let Err(error) = file.validate(self.options.max_upload_size_mb) {
            self.update_if_idle(Some(error.user_message()));
            return Err(error);
        }

        let claimed = self.state.send_if_modified(|state| {
            if state.is_idle() {
                *state = TrackerState::Submitting;
                true
            } else {
                false
            }
        });
        if !claimed {
            return Err(self.busy_error());
        }
        let claim = Claim::new(&self.state, TrackerState::Idle { error: Some(SUBMISSION_CANCELLED.to_string()) });

        log::info!("📤 Submitting {}", file.file_name);
        match self.api.create_analysis(&file).await {
            Ok(analysis) => {
                log::debug!("Analysis {} accepted with id {}", analysis.code, analysis.id);
                claim.settle(TrackerState::Created { analysis: analysis.clone() });
                Ok(analysis)
            }
            Err(error) => {
                log::error!("❌ Submission failed: {}", error.technical_details());
                claim.settle(TrackerState::Idle { error: Some(error.user_message()) });
                Err(error)
            }
        }
    }

    /// Polls the created analysis until the server reports a terminal status,
    /// the analysis disappears, the failure budget runs out or `cancel`
    /// fires. Returns the final state. Dropping the future abandons the
    /// analysis as if `cancel` had fired.
    pub async fn track(&self, cancel: CancellationToken) -> ClientResult<TrackerState> {
        let mut claimed: Option<AnalysisCreated> = None;
        self.state.send_if_modified(|state| match state {
            TrackerState::Created { analysis } => {
                claimed = Some(analysis.clone());
                *state = TrackerState::Polling {
                    analysis_id: analysis.id.clone(),
                    status: analysis.status,
                    attempts: 0,
                    consecutive_failures: 0,
                };
                true
            }
            _ => false,
        });
        let Some(analysis) = claimed else {
            return Err(self.busy_error());
        };

        let analysis_id = analysis.id;
        let claim = Claim::new(&self.state, abandoned(&analysis_id, CANCELLED_REASON));
        // Only a job still sitting in CREATED is worth waiting a tick for.
        let delay_first = analysis.status == AnalysisStatus::Created;

        let outcome = self
            .resolver
            .poll_until_terminal(
                &analysis_id,
                analysis.status,
                self.options.poll_policy(),
                delay_first,
                &cancel,
                |progress| {
                    self.state.send_replace(TrackerState::Polling {
                        analysis_id: analysis_id.clone(),
                        status: progress.status,
                        attempts: progress.attempts,
                        consecutive_failures: progress.consecutive_failures,
                    });
                },
            )
            .await;

        let state = match outcome {
            PollOutcome::Finished(detail) if detail.status == AnalysisStatus::Failed => {
                let message = detail.failure_message().to_string();
                log::warn!("❌ Analysis {} failed: {}", detail.code, message);
                TrackerState::Failed { analysis_id, message }
            }
            PollOutcome::Finished(detail) => {
                log::info!("✅ Analysis {} finished after {} checks", detail.code, self.resolver.calls());
                TrackerState::Resolved { detail }
            }
            PollOutcome::Cancelled => abandoned(&analysis_id, CANCELLED_REASON),
            PollOutcome::GaveUp(ResolveError::Transient(error)) => {
                abandoned(&analysis_id, &format!("Connection lost: {}", error.user_message()))
            }
            PollOutcome::GaveUp(error) | PollOutcome::Stopped(error) => {
                log::error!("❌ Stopped tracking {}: {}", analysis_id, error);
                abandoned(&analysis_id, &error.to_string())
            }
        };
        Ok(claim.settle(state))
    }

    /// `create()` followed by `track()`.
    pub async fn submit_and_track(&self, cancel: CancellationToken) -> ClientResult<TrackerState> {
        self.create().await?;
        self.track(cancel).await
    }

    /// Starts a fresh session. Not allowed while a request is outstanding.
    pub fn reset(&self) -> ClientResult<()> {
        if self.state.borrow().is_busy() {
            return Err(self.busy_error());
        }
        self.clear_file();
        self.state.send_replace(TrackerState::default());
        Ok(())
    }

    fn update_if_idle(&self, error: Option<String>) {
        self.state.send_if_modified(|state| {
            if state.is_idle() {
                *state = TrackerState::Idle { error: error.clone() };
                true
            } else {
                false
            }
        });
    }

    fn busy_error(&self) -> ClientError {
        let current = self.state.borrow().name();
        ClientError::validation_error(
            "state",
            current,
            "only one submission per tracker at a time",
            Some("Wait for the current analysis or reset the tracker"),
        )
    }

    fn staged_guard(&self) -> MutexGuard<'_, Option<StagedFile>> {
        self.staged.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn abandoned(analysis_id: &str, reason: &str) -> TrackerState {
    TrackerState::Abandoned {
        analysis_id: analysis_id.to_string(),
        reason: reason.to_string(),
    }
}

/// Held while a `Submitting` or `Polling` state is owned by a running
/// future. If that future is dropped before it settles, the tracker falls
/// back to `fallback` so it does not stay busy forever.
struct Claim<'a> {
    state: &'a watch::Sender<TrackerState>,
    fallback: Option<TrackerState>,
}

impl<'a> Claim<'a> {
    fn new(state: &'a watch::Sender<TrackerState>, fallback: TrackerState) -> Self {
        Self {
            state,
            fallback: Some(fallback),
        }
    }

    fn settle(mut self, state: TrackerState) -> TrackerState {
        self.fallback = None;
        self.state.send_replace(state.clone());
        state
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        let Some(fallback) = self.fallback.take() else {
            return;
        };
        log::debug!("Tracker released mid-request, falling back to {}", fallback.name());
        self.state.send_if_modified(|state| {
            if state.is_busy() {
                *state = fallback;
                true
            } else {
                false
            }
        });
    }
}
