use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub system_name: Option<String>,
    #[serde(default)]
    pub system_version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
