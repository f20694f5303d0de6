use serde::{Deserialize, Serialize};
use crate::structs::analysis::analysis_summary::AnalysisSummary;

/// `GET /analyses` answers either with a bare array or with a paginated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisPage {
    Paginated {
        items: Vec<AnalysisSummary>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        size: Option<u32>,
        #[serde(default)]
        pages: Option<u32>,
    },
    Plain(Vec<AnalysisSummary>),
}

impl AnalysisPage {
    pub fn into_items(self) -> Vec<AnalysisSummary> {
        match self {
            AnalysisPage::Paginated { items, .. } => items,
            AnalysisPage::Plain(items) => items,
        }
    }
}
