use serde::{Deserialize, Serialize};
use crate::enums::dread_band::DreadBand;
use crate::enums::stride_category::StrideCategory;
use crate::structs::report::dread_score::DreadScore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub component_id: String,
    pub threat_type: StrideCategory,
    pub description: String,
    pub mitigation: String,
    #[serde(default)]
    pub dread_score: Option<f64>,
    #[serde(default)]
    pub dread_details: Option<DreadScore>,
}

impl Threat {
    /// Overall score, falling back to the mean of the breakdown when the
    /// server only sent details.
    pub fn effective_score(&self) -> Option<f64> {
        self.dread_score
            .or_else(|| self.dread_details.as_ref().map(DreadScore::average))
    }

    pub fn band(&self) -> Option<DreadBand> {
        self.effective_score().map(DreadBand::from_score)
    }
}
