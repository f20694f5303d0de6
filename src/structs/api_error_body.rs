use serde::Deserialize;

/// Error bodies sent by the backend. The analyzer answers `{error, details}`,
/// the job service answers FastAPI's `{detail}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match (&self.details, &self.detail) {
            (Some(details), _) => Some(details.clone()),
            (None, Some(detail)) if !detail.is_string() => Some(detail.clone()),
            _ => None,
        }
    }
}
