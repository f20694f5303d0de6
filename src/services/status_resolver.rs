use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use crate::enums::analysis_status::AnalysisStatus;
use crate::errors::ClientError;
use crate::structs::analysis::analysis_detail::AnalysisDetail;
use crate::traits::threat_modeling_api::ThreatModelingApi;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The analysis does not exist; polling must stop.
    #[error("Analysis '{id}' not found")]
    NotFound { id: String },

    /// Network-class failure; the next scheduled tick may succeed.
    #[error("{0}")]
    Transient(ClientError),

    /// The server refused the request for a reason retrying will not fix.
    #[error("{0}")]
    Rejected(ClientError),

    /// The server answered with a record that breaks the status invariants.
    #[error("Analysis '{id}' returned an inconsistent record: {reason}")]
    Malformed { id: String, reason: String },

    /// Produced while polling: the server reported an earlier status than
    /// one already observed.
    #[error("Analysis '{id}' went back from {from} to {to}")]
    Regressed {
        id: String,
        from: AnalysisStatus,
        to: AnalysisStatus,
    },
}

impl ResolveError {
    pub const fn is_transient(&self) -> bool {
        matches!(self, ResolveError::Transient(_))
    }

    fn classify(id: &str, error: ClientError) -> Self {
        if error.is_not_found() {
            ResolveError::NotFound { id: id.to_string() }
        } else if error.is_transient() {
            ResolveError::Transient(error)
        } else {
            ResolveError::Rejected(error)
        }
    }
}

/// Pacing and failure budget for following one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Consecutive transient errors or status regressions tolerated.
    pub max_failures: u32,
}

/// Reported after every check that did not end the poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollProgress {
    pub status: AnalysisStatus,
    pub attempts: u32,
    pub consecutive_failures: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The server reported ANALYZED or FAILED.
    Finished(Box<AnalysisDetail>),
    Cancelled,
    /// The failure budget ran out; carries the last setback.
    GaveUp(ResolveError),
    /// An error retrying cannot fix.
    Stopped(ResolveError),
}

/// Single-shot lookup of an analysis. Used as the polling primitive by the
/// tracker and directly by the detail view.
pub struct StatusResolver<A: ThreatModelingApi> {
    api: Arc<A>,
    calls: AtomicUsize,
}

impl<A: ThreatModelingApi> StatusResolver<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fetches the current record whatever its status; callers decide what to render.
    pub async fn resolve(&self, id: &str) -> Result<AnalysisDetail, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let detail = self
            .api
            .get_analysis_detail(id)
            .await
            .map_err(|e| ResolveError::classify(id, e))?;

        if let Err(e) = detail.validate() {
            log::warn!("Analysis {} failed validation: {}", id, e);
            return Err(ResolveError::Malformed {
                id: id.to_string(),
                reason: e.user_message(),
            });
        }

        log::debug!("🔎 Analysis {} is {}", detail.code, detail.status);
        Ok(detail)
    }

    /// Resolves `id` on `policy.interval` until the server reports a terminal
    /// status. `seen` is the last status known to the caller; a terminal one
    /// only counts as PROCESSING so the detail record decides the outcome.
    pub async fn poll_until_terminal<F>(
        &self,
        id: &str,
        seen: AnalysisStatus,
        policy: PollPolicy,
        delay_first: bool,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> PollOutcome
    where
        F: FnMut(PollProgress),
    {
        let status = if seen.is_terminal() { AnalysisStatus::Processing } else { seen };
        let mut progress = PollProgress {
            status,
            attempts: 0,
            consecutive_failures: 0,
        };
        let mut wait = delay_first;

        loop {
            if wait {
                tokio::select! {
                    _ = cancel.cancelled() => return PollOutcome::Cancelled,
                    _ = tokio::time::sleep(policy.interval) => {}
                }
            }
            wait = true;

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                outcome = self.resolve(id) => outcome,
            };
            progress.attempts += 1;

            let setback = match outcome {
                Ok(detail) if progress.status.can_transition_to(detail.status) => {
                    if detail.status.is_terminal() {
                        return PollOutcome::Finished(Box::new(detail));
                    }
                    progress.status = detail.status;
                    progress.consecutive_failures = 0;
                    None
                }
                Ok(detail) => Some(ResolveError::Regressed {
                    id: id.to_string(),
                    from: progress.status,
                    to: detail.status,
                }),
                Err(error @ ResolveError::Transient(_)) => Some(error),
                Err(error) => return PollOutcome::Stopped(error),
            };

            if let Some(error) = setback {
                progress.consecutive_failures += 1;
                log::warn!(
                    "🔄 Check {} for {} failed ({}/{}): {}",
                    progress.attempts, id, progress.consecutive_failures, policy.max_failures, error
                );
                if progress.consecutive_failures >= policy.max_failures {
                    return PollOutcome::GaveUp(error);
                }
            }

            on_progress(progress);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
