use std::time::Duration;
use crate::config::constants::{DEFAULT_NOTIFICATION_LIMIT, DEFAULT_NOTIFICATION_POLL_INTERVAL_SECS};
use crate::structs::config::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerOptions {
    pub interval: Duration,
    pub limit: u32,
}

impl PollerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.polling.notification_interval(),
            limit: config.polling.notification_limit,
        }
    }
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_NOTIFICATION_POLL_INTERVAL_SECS),
            limit: DEFAULT_NOTIFICATION_LIMIT,
        }
    }
}
