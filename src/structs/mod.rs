pub mod analysis;
pub mod api_error_body;
pub mod cli;
pub mod config;
pub mod detection_thresholds;
pub mod health_status;
pub mod notification;
pub mod poller_options;
pub mod report;
pub mod staged_file;
pub mod tracker_options;
