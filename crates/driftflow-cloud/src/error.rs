//! Drift detection error types

use thiserror::Error;

/// Error code the provider returns for requests naming a missing stack.
const VALIDATION_ERROR: &str = "ValidationError";

/// Drift detection errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("No drift detection was requested for stack: {0}")]
    DetectionNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        CloudError::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Provider error code, if this error came from the provider
    pub fn code(&self) -> Option<&str> {
        match self {
            CloudError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True for `ValidationError` responses whose message says the stack does not exist.
    ///
    /// This is the only provider error the trigger step recovers from.
    pub fn is_stack_not_found(&self) -> bool {
        match self {
            CloudError::Api { code, message } => {
                code == VALIDATION_ERROR && message.contains("does not exist")
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
