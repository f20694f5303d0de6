use chrono::NaiveDate;
use serde::Serialize;
use crate::enums::analysis_status::AnalysisStatus;

/// Query filters for listing analyses. Unset fields are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AnalysisStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl AnalysisFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(code) = &self.code {
            pairs.push(("code", code.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(from) = self.created_at_from {
            pairs.push(("created_at_from", from.to_string()));
        }
        if let Some(to) = self.created_at_to {
            pairs.push(("created_at_to", to.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}
