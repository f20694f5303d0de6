pub mod analysis_status;
pub mod commands;
pub mod dread_band;
pub mod risk_level;
pub mod stride_category;
pub mod tracker_state;
