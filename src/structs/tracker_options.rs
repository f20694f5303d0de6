use std::time::Duration;
use crate::config::constants::{DEFAULT_ANALYSIS_POLL_INTERVAL_MS, DEFAULT_MAX_TRANSIENT_FAILURES, DEFAULT_MAX_UPLOAD_SIZE_MB};
use crate::services::status_resolver::PollPolicy;
use crate::structs::config::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerOptions {
    pub poll_interval: Duration,
    pub max_transient_failures: u32,
    pub max_upload_size_mb: u64,
}

impl TrackerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.polling.analysis_interval(),
            max_transient_failures: config.polling.max_transient_failures.max(1),
            max_upload_size_mb: config.detection.max_upload_size_mb,
        }
    }

    pub const fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            max_failures: self.max_transient_failures,
        }
    }
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_ANALYSIS_POLL_INTERVAL_MS),
            max_transient_failures: DEFAULT_MAX_TRANSIENT_FAILURES,
            max_upload_size_mb: DEFAULT_MAX_UPLOAD_SIZE_MB,
        }
    }
}
