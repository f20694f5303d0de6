use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PollingConfig {
    #[serde(default = "ConfigHelper::default_analysis_interval_ms")]
    pub analysis_interval_ms: u64,

    #[serde(default = "ConfigHelper::default_notification_interval_secs")]
    pub notification_interval_secs: u64,

    #[serde(default = "ConfigHelper::default_notification_limit")]
    pub notification_limit: u32,

    /// Consecutive transient failures tolerated before tracking gives up.
    #[serde(default = "ConfigHelper::default_max_transient_failures")]
    pub max_transient_failures: u32,
}

impl PollingConfig {
    pub const fn analysis_interval(&self) -> Duration {
        Duration::from_millis(self.analysis_interval_ms)
    }

    pub const fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_interval_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            analysis_interval_ms: ConfigHelper::default_analysis_interval_ms(),
            notification_interval_secs: ConfigHelper::default_notification_interval_secs(),
            notification_limit: ConfigHelper::default_notification_limit(),
            max_transient_failures: ConfigHelper::default_max_transient_failures(),
        }
    }
}
