//! Email address value object.
//!
//! Normalises (trim + lower-case), validates and fingerprints an address.
//! Once built, an `EmailAddress` is immutable and always valid.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::clock::Clock;
use crate::constants::{MAX_EMAIL_LENGTH, MAX_EMAIL_LOCAL_PART_LENGTH};
use crate::encoding::ToBase64;
use crate::error::{DomainError, DomainResult};

/// Dot-separated atoms, one `@`, two or more non-empty domain labels and an
/// alphabetic (or punycode) top-level label. Input is already lower-cased.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let atom = r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+";
    let label = r"[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";
    let tld = r"(?:[a-z]{2,}|xn--[a-z0-9-]+)";
    Regex::new(&format!(r"^{atom}(?:\.{atom})*@(?:{label}\.)+{tld}$"))
        .expect("email pattern is a valid regex")
});

/// Validated, normalised email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct EmailAddress {
    address: String,
    fingerprint: String,
}

impl EmailAddress {
    /// Create an email address from raw user input.
    ///
    /// The clock is accepted so every identity factory shares one shape; it
    /// plays no part in validation.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidEmail` if the input is blank or does not
    /// match the address grammar.
    pub fn create(raw: &str, _clock: &dyn Clock) -> DomainResult<Self> {
        Self::parse(raw)
    }

    /// Same rules as [`EmailAddress::create`], without a clock.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let address = raw.trim().to_lowercase();

        if let Err(reason) = Self::check(&address) {
            tracing::debug!(reason, length = address.len(), "email rejected");
            return Err(DomainError::InvalidEmail);
        }

        let fingerprint = address.to_base64();
        Ok(Self {
            address,
            fingerprint,
        })
    }

    fn check(address: &str) -> Result<(), &'static str> {
        if address.is_empty() {
            return Err("empty");
        }
        if address.chars().count() > MAX_EMAIL_LENGTH {
            return Err("too long");
        }
        let local = address.split('@').next().unwrap_or_default();
        if local.chars().count() > MAX_EMAIL_LOCAL_PART_LENGTH {
            return Err("local part too long");
        }
        if !EMAIL_PATTERN.is_match(address) {
            return Err("grammar");
        }
        Ok(())
    }

    /// Normalised address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Stable fingerprint derived from the normalised address
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Consume and return the normalised address.
    pub fn into_string(self) -> String {
        self.address
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(raw: String) -> DomainResult<Self> {
        Self::parse(&raw)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address)
    }
}
