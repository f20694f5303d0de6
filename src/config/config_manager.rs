use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{ClientError, ClientResult};
use crate::structs::config::config::Config;
use crate::structs::detection_thresholds::DetectionThresholds;

const SAMPLE_CONFIG: &str = r#"# Threat Modeling client configuration

[api]
# Backend root and the prefix every endpoint lives under
base_url = "http://localhost:8000"
api_prefix = "/api/v1"

# Web UI root, used by `threatmodel open`
web_url = "http://localhost:5173"

# Deadlines (seconds). Analysis calls wait on model inference and need a long one;
# notification polling uses a short one so a stalled request never delays the next tick.
request_timeout_secs = 30
analysis_timeout_secs = 120
notification_timeout_secs = 5

[polling]
# How often a submitted analysis is re-checked (milliseconds)
analysis_interval_ms = 2000

# How often the unread notification inbox is refreshed (seconds)
notification_interval_secs = 10
notification_limit = 20

# Consecutive network failures tolerated while tracking an analysis
max_transient_failures = 5

[detection]
# Optional detector thresholds for `threatmodel analyze` (0.10 - 0.90)
# confidence = 0.5
# iou = 0.45
max_upload_size_mb = 10

[logging]
# error, warn, info, debug or trace. RUST_LOG takes precedence.
level = "info"
"#;

pub struct ConfigManager;

impl ConfigManager {

    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load() -> ClientResult<Config> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> ClientResult<Config> {
        log::debug!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            ClientError::config_error(
                &format!("cannot read {}: {}", path.display(), e),
                None,
                Some("Check file permissions"),
            )
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn sample_config() -> &'static str {
        SAMPLE_CONFIG
    }

    pub fn create_sample_config() -> ClientResult<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            ClientError::config_error("home directory not found", None, Some("Set the HOME environment variable"))
        })?;
        Self::write_sample_config(&path)?;
        Ok(path)
    }

    pub fn write_sample_config(path: &Path) -> ClientResult<()> {
        if path.exists() {
            return Err(ClientError::config_error(
                &format!("{} already exists", path.display()),
                None,
                Some("Edit the existing file or remove it first"),
            ));
        }
        let io_error = |e: std::io::Error| {
            ClientError::config_error(&format!("cannot write {}: {}", path.display(), e), None, None)
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, SAMPLE_CONFIG).map_err(io_error)?;
        log::info!("✅ Created sample config at: {}", path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (name, url) in [("api.base_url", &config.api.base_url), ("api.web_url", &config.api.web_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("{} must start with http:// or https://: {}", name, url));
            }
        }

        for (name, value) in [
            ("api.request_timeout_secs", config.api.request_timeout_secs),
            ("api.analysis_timeout_secs", config.api.analysis_timeout_secs),
            ("api.notification_timeout_secs", config.api.notification_timeout_secs),
            ("polling.analysis_interval_ms", config.polling.analysis_interval_ms),
            ("polling.notification_interval_secs", config.polling.notification_interval_secs),
            ("detection.max_upload_size_mb", config.detection.max_upload_size_mb),
        ] {
            if value == 0 {
                errors.push(format!("{} must be greater than zero", name));
            }
        }

        if config.polling.max_transient_failures == 0 {
            errors.push("polling.max_transient_failures must be at least 1".to_string());
        }

        if config.polling.notification_limit == 0 {
            errors.push("polling.notification_limit must be at least 1".to_string());
        }

        let thresholds = DetectionThresholds::new(config.detection.confidence, config.detection.iou);
        if let Err(e) = thresholds.validate() {
            errors.push(e.user_message());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

}
