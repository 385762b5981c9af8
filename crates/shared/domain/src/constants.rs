//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Email
// =============================================================================

/// Maximum length of a full email address (RFC 5321 path limit minus brackets)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of the local part (before `@`)
pub const MAX_EMAIL_LOCAL_PART_LENGTH: usize = 64;

// =============================================================================
// Password
// =============================================================================

/// Minimum password length requirement (inclusive)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length requirement (exclusive)
pub const MAX_PASSWORD_LENGTH: usize = 48;

/// Default length for generated temporary passwords
pub const DEFAULT_GENERATED_PASSWORD_LENGTH: usize = 16;

/// Lowercase pool, always part of generated passwords
pub const PASSWORD_LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Digit pool, always part of generated passwords
pub const PASSWORD_DIGITS: &[u8] = b"0123456789";

/// Uppercase pool, included on request
pub const PASSWORD_UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Symbol pool, included on request
pub const PASSWORD_SYMBOLS: &[u8] = b"!@#$%^&*(){}[];";

// =============================================================================
// Verification Code
// =============================================================================

/// Number of digits in a verification code
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Minutes a verification code stays valid after creation
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 5;
