use crate::enums::analysis_status::AnalysisStatus;
use crate::structs::analysis::analysis_created::AnalysisCreated;
use crate::structs::analysis::analysis_detail::AnalysisDetail;

/// State of one analysis submission, from file selection to a final verdict.
///
/// `Failed` is reserved for jobs the server reports as failed. A submission
/// the client could not deliver goes back to `Idle` with an error, and
/// tracking that stops without a verdict ends in `Abandoned`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerState {
    Idle {
        error: Option<String>,
    },
    Submitting,
    Created {
        analysis: AnalysisCreated,
    },
    Polling {
        analysis_id: String,
        status: AnalysisStatus,
        attempts: u32,
        consecutive_failures: u32,
    },
    Resolved {
        detail: Box<AnalysisDetail>,
    },
    Failed {
        analysis_id: String,
        message: String,
    },
    Abandoned {
        analysis_id: String,
        reason: String,
    },
}

impl Default for TrackerState {
    fn default() -> Self {
        TrackerState::Idle { error: None }
    }
}

impl TrackerState {
    pub const fn name(&self) -> &'static str {
        match self {
            TrackerState::Idle { .. } => "idle",
            TrackerState::Submitting => "submitting",
            TrackerState::Created { .. } => "created",
            TrackerState::Polling { .. } => "polling",
            TrackerState::Resolved { .. } => "resolved",
            TrackerState::Failed { .. } => "failed",
            TrackerState::Abandoned { .. } => "abandoned",
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, TrackerState::Idle { .. })
    }

    /// A request is outstanding; no other operation may start.
    pub const fn is_busy(&self) -> bool {
        matches!(self, TrackerState::Submitting | TrackerState::Polling { .. })
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            TrackerState::Resolved { .. } | TrackerState::Failed { .. } | TrackerState::Abandoned { .. }
        )
    }

    pub fn analysis_id(&self) -> Option<&str> {
        match self {
            TrackerState::Created { analysis } => Some(&analysis.id),
            TrackerState::Polling { analysis_id, .. }
            | TrackerState::Failed { analysis_id, .. }
            | TrackerState::Abandoned { analysis_id, .. } => Some(analysis_id),
            TrackerState::Resolved { detail } => Some(&detail.id),
            TrackerState::Idle { .. } | TrackerState::Submitting => None,
        }
    }

    /// Message the UI should show, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            TrackerState::Idle { error } => error.as_deref(),
            TrackerState::Failed { message, .. } => Some(message),
            TrackerState::Abandoned { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean_idle() {
        let state = TrackerState::default();
        assert!(state.is_idle());
        assert_eq!(state.error_message(), None);
        assert_eq!(state.analysis_id(), None);
    }

    #[test]
    fn test_classification() {
        let polling = TrackerState::Polling {
            analysis_id: "a1".to_string(),
            status: AnalysisStatus::Processing,
            attempts: 1,
            consecutive_failures: 0,
        };
        assert!(polling.is_busy());
        assert!(!polling.is_terminal());
        assert_eq!(polling.analysis_id(), Some("a1"));

        let failed = TrackerState::Failed {
            analysis_id: "a1".to_string(),
            message: "model timeout".to_string(),
        };
        assert!(failed.is_terminal());
        assert_eq!(failed.error_message(), Some("model timeout"));
        assert!(TrackerState::Submitting.is_busy());
    }
}
