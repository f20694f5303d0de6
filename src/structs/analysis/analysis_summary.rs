use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::analysis_status::AnalysisStatus;
use crate::enums::risk_level::RiskLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: String,
    pub code: String,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub threat_count: Option<usize>,
}
