//! Application-level error handling.
//!
//! Wraps domain errors for process boundaries (CLI, future adapters) and
//! gives each failure a stable code.

use identity_domain::DomainError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Domain
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for callers
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::InvalidEmail) => "INVALID_EMAIL",
            AppError::Domain(DomainError::InvalidPassword(_)) => "INVALID_PASSWORD",
            AppError::Domain(DomainError::InvalidVerificationCode(_)) => {
                "INVALID_VERIFICATION_CODE"
            }
            AppError::Domain(DomainError::MissingArgument(_)) => "INVALID_ARGUMENT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Domain(DomainError::Internal(_)) | AppError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Domain(DomainError::Internal(msg)) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
