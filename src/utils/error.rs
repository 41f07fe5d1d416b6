use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TaggerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TaggerError::ConfigError { .. }
            | TaggerError::InvalidConfigValueError { .. }
            | TaggerError::MissingConfigError { .. }
            | TaggerError::TomlError(_) => ErrorCategory::Configuration,
            TaggerError::CsvError(_) | TaggerError::MissingColumn { .. } => ErrorCategory::Input,
            TaggerError::IoError(_) | TaggerError::SerializationError(_) => ErrorCategory::Output,
            TaggerError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 依錯誤嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TaggerError::CsvError(_) => {
                "Check that the input is a valid UTF-8 CSV export with a header row".to_string()
            }
            TaggerError::IoError(_) => {
                "Verify the input file exists and the output directory is writable".to_string()
            }
            TaggerError::TomlError(_) => "Fix the TOML syntax in the configuration file".to_string(),
            TaggerError::SerializationError(_) => "Retry with --verbose for details".to_string(),
            TaggerError::ConfigError { .. } | TaggerError::MissingConfigError { .. } => {
                "Review the configuration file or command line flags".to_string()
            }
            TaggerError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            TaggerError::MissingColumn { column } => format!(
                "Add a '{}' column to the export or map it under [columns] in the config",
                column
            ),
            TaggerError::ProcessingError { .. } => {
                "Inspect the offending row; the rest of the catalog was not written".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TaggerError::MissingColumn { column } => {
                format!("The catalog file has no '{}' column", column)
            }
            TaggerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_is_input_error() {
        let err = TaggerError::MissingColumn {
            column: "Title".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("Title"));
        assert!(err.recovery_suggestion().contains("[columns]"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: TaggerError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_invalid_config_value_message() {
        let err = TaggerError::InvalidConfigValueError {
            field: "load.tag_separator".to_string(),
            value: "".to_string(),
            reason: "Value cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(
            err.user_friendly_message(),
            "Invalid setting 'load.tag_separator': Value cannot be empty"
        );
    }
}
