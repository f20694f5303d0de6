use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;
use crate::structs::detection_thresholds::DetectionThresholds;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DetectionConfig {
    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub iou: Option<f64>,

    #[serde(default = "ConfigHelper::default_max_upload_size_mb")]
    pub max_upload_size_mb: u64,
}

impl DetectionConfig {
    /// Thresholds from the config, overridden by whatever the caller passes.
    pub fn thresholds(&self, confidence: Option<f64>, iou: Option<f64>) -> DetectionThresholds {
        DetectionThresholds::new(confidence.or(self.confidence), iou.or(self.iou))
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence: None,
            iou: None,
            max_upload_size_mb: ConfigHelper::default_max_upload_size_mb(),
        }
    }
}
