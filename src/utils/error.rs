use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected payload from {endpoint}: {message}")]
    PayloadError { endpoint: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ApiError(_) => ErrorCategory::Network,
            DashboardError::PayloadError { .. } | DashboardError::SerializationError(_) => {
                ErrorCategory::Data
            }
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DashboardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 載入失敗只會讓儀表板顯示空值
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the data service is reachable and --api-base-url is correct"
            }
            ErrorCategory::Data => "Verify that every collection endpoint returns a JSON array",
            ErrorCategory::Configuration => {
                "Review the command line flags or the TOML configuration file"
            }
            ErrorCategory::System => "Check file permissions and free disk space for the output path",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::ApiError(e) => match e.status() {
                Some(status) => format!("The data service answered with HTTP {}", status),
                None => "The data service could not be reached".to_string(),
            },
            DashboardError::PayloadError { endpoint, .. } => {
                format!("The data service returned unexpected data for {}", endpoint)
            }
            DashboardError::SerializationError(_) => {
                "The dashboard could not be serialized".to_string()
            }
            DashboardError::IoError(e) => format!("File operation failed: {}", e),
            DashboardError::ConfigError { message } => format!("Invalid configuration: {}", message),
            DashboardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            DashboardError::ConfigValidationError { field, message } => {
                format!("Invalid setting '{}': {}", field, message)
            }
        }
    }

    /// 對應 CLI 的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = DashboardError::ConfigValidationError {
            field: "source.base_url".to_string(),
            message: "missing".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("source.base_url"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = DashboardError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_payload_error_message_names_endpoint() {
        let err = DashboardError::PayloadError {
            endpoint: "kurse/".to_string(),
            message: "expected array".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert!(err.to_string().contains("kurse/"));
        assert!(err.user_friendly_message().contains("kurse/"));
    }
}
