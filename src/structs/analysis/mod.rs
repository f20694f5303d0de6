pub mod analysis_created;
pub mod analysis_detail;
pub mod analysis_filter;
pub mod analysis_page;
pub mod analysis_summary;
