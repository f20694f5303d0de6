use async_trait::async_trait;
use crate::errors::ClientResult;
use crate::structs::analysis::analysis_created::AnalysisCreated;
use crate::structs::analysis::analysis_detail::AnalysisDetail;
use crate::structs::analysis::analysis_filter::AnalysisFilter;
use crate::structs::analysis::analysis_summary::AnalysisSummary;
use crate::structs::detection_thresholds::DetectionThresholds;
use crate::structs::notification::unread_notifications::UnreadNotifications;
use crate::structs::report::threat_report::ThreatReport;
use crate::structs::staged_file::StagedFile;

/// Transport boundary to the threat modeling backend.
///
/// Every call returns a tagged result; implementations normalize transport
/// failures into [`crate::errors::ClientError`] and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreatModelingApi: Send + Sync {

    /// Synchronous flow: upload and wait for the full report.
    async fn analyze_diagram(&self, file: &StagedFile, thresholds: &DetectionThresholds) -> ClientResult<ThreatReport>;

    async fn create_analysis(&self, file: &StagedFile) -> ClientResult<AnalysisCreated>;

    /// Fails with `NotFound` when the id is unknown.
    async fn get_analysis_detail(&self, id: &str) -> ClientResult<AnalysisDetail>;

    async fn list_analyses(&self, filter: &AnalysisFilter) -> ClientResult<Vec<AnalysisSummary>>;

    async fn get_unread_notifications(&self, limit: u32) -> ClientResult<UnreadNotifications>;

    /// Idempotent: marking an already-read notification succeeds.
    async fn mark_notification_read(&self, id: &str) -> ClientResult<()>;

    async fn health_check(&self) -> bool;
}
