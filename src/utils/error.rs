use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Population import was cancelled")]
    Cancelled,

    #[error("Failed to parse population file '{}': {source}", file.display())]
    FileParse {
        file: PathBuf,
        #[source]
        source: Box<ImportError>,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Import task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Invalid value '{value}' on line {line} for parameter '{path}'")]
    InvalidValue {
        path: String,
        line: u64,
        value: String,
    },

    #[error("Column '{path}' appears more than once")]
    DuplicateColumn { path: String },

    #[error("Parameter '{path}' has {actual} values but the cache holds {expected} individuals")]
    InvalidCache {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn file_parse(file: impl Into<PathBuf>, source: ImportError) -> Self {
        ImportError::FileParse {
            file: file.into(),
            source: Box::new(source),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ImportError::Cancelled)
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ImportError::Cancelled => ErrorSeverity::Low,
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorSeverity::Medium,
            ImportError::FileParse { .. }
            | ImportError::CsvError(_)
            | ImportError::InvalidValue { .. }
            | ImportError::DuplicateColumn { .. }
            | ImportError::InvalidCache { .. }
            | ImportError::SerializationError(_) => ErrorSeverity::High,
            ImportError::IoError(_) | ImportError::ZipError(_) | ImportError::TaskJoinError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::Cancelled => "Import cancelled, no population was created".to_string(),
            ImportError::FileParse { file, .. } => format!(
                "The population file '{}' could not be read. Check that it is a valid population CSV.",
                file.display()
            ),
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_parse_keeps_source() {
        let err = ImportError::file_parse(
            "pop.csv",
            ImportError::InvalidValue {
                path: "Organism|Age".to_string(),
                line: 3,
                value: "abc".to_string(),
            },
        );

        let message = err.to_string();
        assert!(message.contains("pop.csv"));
        assert!(message.contains("abc"));
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_cancelled_is_low_severity() {
        assert!(ImportError::Cancelled.is_cancelled());
        assert_eq!(ImportError::Cancelled.severity(), ErrorSeverity::Low);
    }
}
