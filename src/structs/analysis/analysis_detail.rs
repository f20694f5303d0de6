use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::analysis_status::AnalysisStatus;
use crate::errors::{ClientError, ClientResult};
use crate::structs::report::threat_report::ThreatReport;

pub const DEFAULT_FAILURE_MESSAGE: &str = "Analysis failed without an error message";

/// Full state of one analysis. `result` is only set once the job is
/// `ANALYZED`, `error_message` only once it is `FAILED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetail {
    pub id: String,
    pub code: String,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub processing_logs: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<ThreatReport>,
}

impl AnalysisDetail {
    pub fn validate(&self) -> ClientResult<()> {
        let analyzed = self.status == AnalysisStatus::Analyzed;
        let failed = self.status == AnalysisStatus::Failed;

        if self.result.is_some() != analyzed {
            return Err(self.malformed(if analyzed {
                "status ANALYZED requires a result"
            } else {
                "result is only allowed when status is ANALYZED"
            }));
        }
        if self.error_message.is_some() != failed {
            return Err(self.malformed(if failed {
                "status FAILED requires an error_message"
            } else {
                "error_message is only allowed when status is FAILED"
            }));
        }
        if self.finished_at.is_some() && !self.status.is_terminal() {
            return Err(self.malformed("finished_at is set before a terminal status"));
        }
        if self.started_at.is_some() && self.status == AnalysisStatus::Created {
            return Err(self.malformed("started_at is set while status is CREATED"));
        }
        if let Some(result) = &self.result {
            result.validate()?;
        }
        Ok(())
    }

    pub fn failure_message(&self) -> &str {
        self.error_message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }

    fn malformed(&self, reason: &str) -> ClientError {
        ClientError::parse_error("analysis detail", &format!("{} (analysis {})", reason, self.id))
    }
}
