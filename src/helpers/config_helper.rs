use crate::config::constants::{
    DEFAULT_ANALYSIS_POLL_INTERVAL_MS, DEFAULT_ANALYSIS_TIMEOUT_SECS, DEFAULT_API_PREFIX, DEFAULT_BASE_URL,
    DEFAULT_MAX_TRANSIENT_FAILURES, DEFAULT_MAX_UPLOAD_SIZE_MB, DEFAULT_NOTIFICATION_LIMIT,
    DEFAULT_NOTIFICATION_POLL_INTERVAL_SECS, DEFAULT_NOTIFICATION_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_WEB_URL,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    pub fn default_api_prefix() -> String {
        DEFAULT_API_PREFIX.to_string()
    }

    pub fn default_web_url() -> String {
        DEFAULT_WEB_URL.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn default_analysis_timeout_secs() -> u64 {
        DEFAULT_ANALYSIS_TIMEOUT_SECS
    }

    pub fn default_notification_timeout_secs() -> u64 {
        DEFAULT_NOTIFICATION_TIMEOUT_SECS
    }

    pub fn default_analysis_interval_ms() -> u64 {
        DEFAULT_ANALYSIS_POLL_INTERVAL_MS
    }

    pub fn default_notification_interval_secs() -> u64 {
        DEFAULT_NOTIFICATION_POLL_INTERVAL_SECS
    }

    pub fn default_notification_limit() -> u32 {
        DEFAULT_NOTIFICATION_LIMIT
    }

    pub fn default_max_transient_failures() -> u32 {
        DEFAULT_MAX_TRANSIENT_FAILURES
    }

    pub fn default_max_upload_size_mb() -> u64 {
        DEFAULT_MAX_UPLOAD_SIZE_MB
    }

    pub fn default_log_level() -> String {
        "info".to_string()
    }
}
