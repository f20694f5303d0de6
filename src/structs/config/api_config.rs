use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "ConfigHelper::default_base_url")]
    pub base_url: String,

    #[serde(default = "ConfigHelper::default_api_prefix")]
    pub api_prefix: String,

    /// Web UI root, used to build links to analysis pages.
    #[serde(default = "ConfigHelper::default_web_url")]
    pub web_url: String,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Deadline for analyze/create calls, which wait on slow model inference.
    #[serde(default = "ConfigHelper::default_analysis_timeout_secs")]
    pub analysis_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_notification_timeout_secs")]
    pub notification_timeout_secs: u64,
}

impl ApiConfig {
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}/{}", base, prefix, path)
        }
    }

    pub fn analysis_page_url(&self, analysis_id: &str) -> String {
        format!("{}/analyses/{}", self.web_url.trim_end_matches('/'), analysis_id)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub const fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    pub const fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ConfigHelper::default_base_url(),
            api_prefix: ConfigHelper::default_api_prefix(),
            web_url: ConfigHelper::default_web_url(),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
            analysis_timeout_secs: ConfigHelper::default_analysis_timeout_secs(),
            notification_timeout_secs: ConfigHelper::default_notification_timeout_secs(),
        }
    }
}
