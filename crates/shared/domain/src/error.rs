//! Domain-level errors.
//!
//! These errors represent invariant violations raised by the identity value
//! objects. They are independent of infrastructure concerns and carry a fixed,
//! human-readable message.

use thiserror::Error;

/// Reason a plaintext password was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    #[error("Password cannot be null or empty")]
    Empty,

    #[error("Password should have at least 8 characters")]
    TooShort,

    #[error("Password should have less than 48 characters")]
    TooLong,

    #[error("Password length is too short for the requested character classes")]
    TooShortToGenerate,
}

/// Reason a verification attempt (or activation) was refused.
///
/// Callers see the same message for every reason; the variant is kept for
/// programmatic checks and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRejection {
    /// The code has not been activated yet
    NotActive,
    /// The code was already consumed
    AlreadyVerified,
    /// No code was supplied
    Empty,
    /// The supplied code differs from the issued one
    Mismatch,
    /// The validity window has elapsed
    Expired,
    /// A stored code does not have the expected shape
    Malformed,
}

/// Domain-specific errors for identity invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email failed normalisation or grammar checks
    #[error("Invalid email")]
    InvalidEmail,

    /// Password failed strength rules
    #[error("{0}")]
    InvalidPassword(PasswordViolation),

    /// Verification code could not be activated or verified
    #[error("Invalid verification code")]
    InvalidVerificationCode(CodeRejection),

    /// A required argument was absent
    #[error("Value cannot be null: {0}")]
    MissingArgument(&'static str),

    /// Internal domain error (e.g. hashing backend failure)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(violation: PasswordViolation) -> Self {
        DomainError::InvalidPassword(violation)
    }

    /// Create a verification code error
    pub fn verification(reason: CodeRejection) -> Self {
        DomainError::InvalidVerificationCode(reason)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_messages_are_fixed() {
        assert_eq!(
            DomainError::password(PasswordViolation::Empty).to_string(),
            "Password cannot be null or empty"
        );
        assert_eq!(
            DomainError::password(PasswordViolation::TooShort).to_string(),
            "Password should have at least 8 characters"
        );
        assert_eq!(
            DomainError::password(PasswordViolation::TooLong).to_string(),
            "Password should have less than 48 characters"
        );
    }

    #[test]
    fn test_verification_message_hides_reason() {
        let mismatch = DomainError::verification(CodeRejection::Mismatch);
        let expired = DomainError::verification(CodeRejection::Expired);

        assert_eq!(mismatch.to_string(), "Invalid verification code");
        assert_eq!(mismatch.to_string(), expired.to_string());
        assert_ne!(mismatch, expired);
    }
}
