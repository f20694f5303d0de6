pub mod component;
pub mod connection;
pub mod dread_score;
pub mod threat;
pub mod threat_report;
