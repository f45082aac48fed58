use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Service {id} not found")]
    NotFoundError { id: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
    Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::HttpError(_) | CatalogError::ApiError { .. } => ErrorCategory::Network,
            CatalogError::IoError(_) => ErrorCategory::Storage,
            CatalogError::SerializationError(_) => ErrorCategory::Data,
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CatalogError::NotFoundError { .. } | CatalogError::ValidationError { .. } => {
                ErrorCategory::Request
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::NotFoundError { .. } => ErrorSeverity::Low,
            CatalogError::HttpError(_)
            | CatalogError::ApiError { .. }
            | CatalogError::ValidationError { .. } => ErrorSeverity::Medium,
            CatalogError::SerializationError(_) | CatalogError::IoError(_) => ErrorSeverity::High,
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::HttpError(_) => "Could not reach the catalog service".to_string(),
            CatalogError::ApiError { message, .. } => message.clone(),
            CatalogError::IoError(e) => format!("File access failed: {}", e),
            CatalogError::SerializationError(_) => "The catalog data is not valid JSON".to_string(),
            CatalogError::NotFoundError { id } => format!("Service {} does not exist", id),
            CatalogError::ValidationError { message } => message.clone(),
            CatalogError::ConfigError { message } => format!("Configuration problem: {}", message),
            CatalogError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the catalog endpoint is running and reachable",
            ErrorCategory::Storage => "Check the file path and its permissions",
            ErrorCategory::Data => "Check that the catalog file contains a JSON array of services",
            ErrorCategory::Configuration => "Review the configuration file and command line flags",
            ErrorCategory::Request => "Check the service id or the submitted fields and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_is_passed_through() {
        let err = CatalogError::ApiError {
            status: 404,
            message: "Service 9 not found".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.user_friendly_message(), "Service 9 not found");
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = CatalogError::InvalidConfigValueError {
            field: "catalog.endpoint".to_string(),
            value: "ftp://example.com".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("catalog.endpoint"));
    }
}
