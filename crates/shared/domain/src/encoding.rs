//! String encoding helpers used for fingerprints.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{DomainError, DomainResult};

/// Base64 extension for string slices.
pub trait ToBase64 {
    /// Standard, padded base64 of the UTF-8 bytes
    fn to_base64(&self) -> String;
}

impl ToBase64 for str {
    fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }
}

/// Encode an optional string, rejecting a missing value.
///
/// # Errors
/// Returns `DomainError::MissingArgument` when `value` is `None`.
pub fn encode_base64(value: Option<&str>) -> DomainResult<String> {
    value
        .map(ToBase64::to_base64)
        .ok_or(DomainError::MissingArgument("value"))
}
