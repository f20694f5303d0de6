use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::analysis_status::AnalysisStatus;

/// Server acknowledgement of a new analysis job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCreated {
    pub id: String,
    pub code: String,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
}
