pub mod api_config;
pub mod config;
pub mod detection_config;
pub mod logging_config;
pub mod polling_config;
