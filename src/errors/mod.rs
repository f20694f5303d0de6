use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

pub const ANALYSIS_TIMEOUT_MESSAGE: &str = "Request timed out. The analysis is taking longer than expected.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientError {
    // Input errors, raised before anything touches the network
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // Transport errors
    Timeout {
        operation: String,
        timeout_secs: u64,
        long_running: bool,
    },
    ServerError {
        status_code: Option<u16>,
        message: String,
        details: Option<serde_json::Value>,
    },
    NetworkError {
        operation: String,
        url: Option<String>,
        reason: String,
    },
    NotFound {
        resource: String,
        id: String,
    },

    // The backend finished the job and reported it as failed
    AnalysisFailed {
        analysis_id: String,
        message: String,
    },

    // Payload errors
    ParseError {
        content_type: String,
        reason: String,
    },

    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
}

impl ClientError {
    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn network_error(operation: &str, url: Option<&str>, reason: &str) -> Self {
        Self::NetworkError {
            operation: operation.to_string(),
            url: url.map(|s| s.to_string()),
            reason: reason.to_string(),
        }
    }

    pub fn server_error(status_code: Option<u16>, message: &str, details: Option<serde_json::Value>) -> Self {
        Self::ServerError {
            status_code,
            message: message.to_string(),
            details,
        }
    }

    pub fn timeout(operation: &str, timeout_secs: u64, long_running: bool) -> Self {
        Self::Timeout {
            operation: operation.to_string(),
            timeout_secs,
            long_running,
        }
    }

    pub fn analysis_failed(analysis_id: &str, message: &str) -> Self {
        Self::AnalysisFailed {
            analysis_id: analysis_id.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for failures a later attempt may not hit again: no response, a
    /// deadline, or a 5xx from the server.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::NetworkError { .. } => true,
            Self::ServerError { status_code, .. } => status_code.map_or(true, |code| code >= 500),
            _ => false,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ValidationError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::NotFound { .. } => false,
            Self::AnalysisFailed { .. } => false,
            Self::ParseError { .. } => false,
            _ => self.is_transient(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ParseError { .. } => ErrorSeverity::High,
            Self::ServerError { .. } => ErrorSeverity::High,
            Self::AnalysisFailed { .. } => ErrorSeverity::High,
            Self::ConfigurationError { .. } => ErrorSeverity::Medium,
            Self::NetworkError { .. } => ErrorSeverity::Medium,
            Self::Timeout { .. } => ErrorSeverity::Medium,
            Self::NotFound { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. } => ErrorSeverity::Low,
        }
    }

    /// Message shown to the user as-is. Server messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = if value.is_empty() {
                    format!("Validation error for '{}': {}", field, constraint)
                } else {
                    format!("Validation error for '{}': value '{}' violates constraint '{}'", field, value, constraint)
                };
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::Timeout { operation, timeout_secs, long_running } => {
                if *long_running {
                    ANALYSIS_TIMEOUT_MESSAGE.to_string()
                } else {
                    format!("Request timed out after {}s during {}", timeout_secs, operation)
                }
            }
            Self::ServerError { message, .. } => message.clone(),
            Self::NetworkError { operation, url, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                msg
            }
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::AnalysisFailed { message, .. } => message.clone(),
            Self::ParseError { content_type, reason } => {
                format!("Could not parse {} payload: {}", content_type, reason)
            }
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for ClientError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &ClientError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::ValidationError {
            field: "file".to_string(),
            value: String::new(),
            constraint: format!("file must be readable ({})", error),
            suggestion: Some("Check the path and file permissions".to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(error: toml::de::Error) -> Self {
        ClientError::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return ClientError::ParseError {
                content_type: "JSON".to_string(),
                reason: error.to_string(),
            };
        }
        ClientError::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            reason: error.to_string(),
        }
    }
}
