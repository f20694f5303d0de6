use serde::{Deserialize, Serialize};
use crate::structs::config::api_config::ApiConfig;
use crate::structs::config::detection_config::DetectionConfig;
use crate::structs::config::logging_config::LoggingConfig;
use crate::structs::config::polling_config::PollingConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
