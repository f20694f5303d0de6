pub mod api_client;
pub mod status_resolver;
pub mod analysis_tracker;
pub mod notification_poller;
