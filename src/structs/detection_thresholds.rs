use serde::{Deserialize, Serialize};
use crate::errors::{ClientError, ClientResult};

pub const THRESHOLD_MIN: f64 = 0.10;
pub const THRESHOLD_MAX: f64 = 0.90;
pub const THRESHOLD_STEP: f64 = 0.05;

/// Detector thresholds for the synchronous analyze call. Values are sent as
/// given; the server applies its own defaults when a field is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub iou: Option<f64>,
}

impl DetectionThresholds {
    pub const fn new(confidence: Option<f64>, iou: Option<f64>) -> Self {
        Self { confidence, iou }
    }

    pub fn validate(&self) -> ClientResult<()> {
        Self::check("confidence", self.confidence)?;
        Self::check("iou", self.iou)
    }

    /// Multipart text fields for the thresholds that are set.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(confidence) = self.confidence {
            fields.push(("confidence", confidence.to_string()));
        }
        if let Some(iou) = self.iou {
            fields.push(("iou", iou.to_string()));
        }
        fields
    }

    fn check(field: &str, value: Option<f64>) -> ClientResult<()> {
        match value {
            Some(v) if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&v) => Err(ClientError::validation_error(
                field,
                &v.to_string(),
                &format!("must be between {:.2} and {:.2}", THRESHOLD_MIN, THRESHOLD_MAX),
                Some(&format!("Use steps of {:.2}", THRESHOLD_STEP)),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        assert!(DetectionThresholds::new(Some(0.10), Some(0.90)).validate().is_ok());
        assert!(DetectionThresholds::new(None, None).validate().is_ok());
        assert!(DetectionThresholds::new(Some(0.05), None).validate().is_err());
        assert!(DetectionThresholds::new(None, Some(0.95)).validate().is_err());
    }

    #[test]
    fn test_form_fields_pass_values_through() {
        let fields = DetectionThresholds::new(Some(0.35), None).form_fields();
        assert_eq!(fields, vec![("confidence", "0.35".to_string())]);
    }
}
