// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The probe tool could not be run or its output could not be parsed
    #[error("Probe failed for {path}: {message}")]
    ProbeError { path: String, message: String },

    /// The probe succeeded but reported no usable streams
    #[error("No streams found in {path}")]
    NoStreamsFound { path: String },

    /// A supplied path is neither a file nor a directory
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// A step of the remux plan failed
    #[error("Execution failed for {path}: {message}")]
    ExecutionError { path: String, message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
}

impl DomainError {
    pub fn probe(path: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::ProbeError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn execution(path: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::ExecutionError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the batch should simply move on to the next file
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            DomainError::ProbeError { .. }
                | DomainError::NoStreamsFound { .. }
                | DomainError::InvalidPath { .. }
        )
    }
}
