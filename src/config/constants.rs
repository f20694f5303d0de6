pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_WEB_URL: &str = "http://localhost:5173";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 5;

pub const DEFAULT_ANALYSIS_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_NOTIFICATION_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 20;
pub const DEFAULT_MAX_TRANSIENT_FAILURES: u32 = 5;

pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 10;

pub const CONFIG_DIR_NAME: &str = ".threatmodel";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
pub const SPINNER_FRAME_MILLIS: u64 = 150;
