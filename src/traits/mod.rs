pub mod threat_modeling_api;
