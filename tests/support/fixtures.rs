use chrono::{TimeZone, Utc};
use threatmodel::enums::analysis_status::AnalysisStatus;
use threatmodel::enums::risk_level::RiskLevel;
use threatmodel::enums::stride_category::StrideCategory;
use threatmodel::structs::analysis::analysis_created::AnalysisCreated;
use threatmodel::structs::analysis::analysis_detail::AnalysisDetail;
use threatmodel::structs::notification::notification::Notification;
use threatmodel::structs::report::component::Component;
use threatmodel::structs::report::threat::Threat;
use threatmodel::structs::report::threat_report::ThreatReport;
use threatmodel::structs::staged_file::StagedFile;

pub const ANALYSIS_ID: &str = "3f2b9c1e";
pub const ANALYSIS_CODE: &str = "TMA-042";

pub fn png() -> StagedFile {
    StagedFile::new("architecture.png", "image/png", b"\x89PNG\r\n\x1a\n".to_vec())
}

pub fn created(status: AnalysisStatus) -> AnalysisCreated {
    AnalysisCreated {
        id: ANALYSIS_ID.to_string(),
        code: ANALYSIS_CODE.to_string(),
        status,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        image_url: Some("/uploads/architecture.png".to_string()),
    }
}

pub fn report() -> ThreatReport {
    ThreatReport {
        model_used: "yolov8-arch".to_string(),
        components: vec![Component {
            id: "api".to_string(),
            component_type: "service".to_string(),
            name: "Public API".to_string(),
            description: None,
        }],
        connections: vec![],
        threats: vec![Threat {
            component_id: "api".to_string(),
            threat_type: StrideCategory::from_label("Spoofing"),
            description: "Tokens are not bound to the client".to_string(),
            mitigation: "Use mTLS or sender-constrained tokens".to_string(),
            dread_score: Some(6.4),
            dread_details: None,
        }],
        risk_score: 6.4,
        risk_level: RiskLevel::High,
        processing_time: Some(3.2),
        threat_count: 1,
        component_count: 1,
    }
}

/// A server record consistent with `status`.
pub fn detail(status: AnalysisStatus) -> AnalysisDetail {
    let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let started_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 2).unwrap();
    let finished_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 9).unwrap();
    AnalysisDetail {
        id: ANALYSIS_ID.to_string(),
        code: ANALYSIS_CODE.to_string(),
        status,
        created_at,
        started_at: (status != AnalysisStatus::Created).then_some(started_at),
        finished_at: status.is_terminal().then_some(finished_at),
        image_url: None,
        processing_logs: None,
        error_message: (status == AnalysisStatus::Failed).then(|| "model timeout".to_string()),
        result: (status == AnalysisStatus::Analyzed).then(report),
    }
}

pub fn notification(id: &str, minute: u32) -> Notification {
    Notification {
        id: id.to_string(),
        analysis_id: ANALYSIS_ID.to_string(),
        title: "Analysis finished".to_string(),
        message: format!("{} is ready", ANALYSIS_CODE),
        link: format!("/analyses/{}", ANALYSIS_ID),
        is_read: false,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, minute, 0).unwrap(),
    }
}
