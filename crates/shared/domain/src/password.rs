//! Password value object - Domain layer credential handling.
//!
//! Validates strength, hashes with Argon2id and tracks the expiration and
//! forced-change flags owned by the account aggregate. Plaintext never
//! outlives [`Password::create`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;

use crate::clock::Clock;
use crate::constants::{
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PASSWORD_DIGITS, PASSWORD_LOWERCASE,
    PASSWORD_SYMBOLS, PASSWORD_UPPERCASE,
};
use crate::error::{DomainError, DomainResult, PasswordViolation};

/// Password value object holding a salted one-way hash.
///
/// The hash is only reachable through [`Password::hash`]; there is no
/// `Display` or string conversion, so a credential cannot be mistaken for
/// plain text.
#[derive(Clone)]
pub struct Password {
    hash: String,
    expires_at: Option<DateTime<Utc>>,
    must_change: bool,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("must_change", &self.must_change)
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Arguments
    /// * `plain_text` - The raw password (8 to 47 characters, not blank)
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPassword` when the plain text is blank,
    /// too short or too long, and `DomainError::Internal` if hashing fails.
    pub fn create(plain_text: &str) -> DomainResult<Self> {
        if let Err(violation) = Self::validate(plain_text) {
            tracing::debug!(?violation, "password rejected");
            return Err(DomainError::password(violation));
        }

        let hash = Self::hash_plain(plain_text)?;
        Ok(Self {
            hash,
            expires_at: None,
            must_change: false,
        })
    }

    /// Create a Password from an existing hash (from storage).
    ///
    /// Strength rules are not re-applied; they held when the hash was made.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            expires_at: None,
            must_change: false,
        }
    }

    /// Check a plain text against a stored hash.
    ///
    /// Returns false for a malformed stored hash as well as for a mismatch.
    pub fn matches(stored_hash: &str, plain_text: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        }
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::matches(&self.hash, plain_text)
    }

    /// Generate a random temporary password.
    ///
    /// The pool is lowercase letters and digits, plus uppercase letters and
    /// symbols when requested; each requested optional class appears at least
    /// once. The result is not checked against [`Password::create`]'s bounds.
    ///
    /// # Errors
    /// Returns `PasswordViolation::TooShortToGenerate` when `length` is zero or
    /// cannot fit every requested class.
    pub fn generate(
        length: usize,
        include_uppercase: bool,
        include_symbols: bool,
    ) -> DomainResult<String> {
        let mut pool: Vec<u8> = [PASSWORD_LOWERCASE, PASSWORD_DIGITS].concat();
        let mut required: Vec<&[u8]> = Vec::new();

        if include_uppercase {
            pool.extend_from_slice(PASSWORD_UPPERCASE);
            required.push(PASSWORD_UPPERCASE);
        }
        if include_symbols {
            pool.extend_from_slice(PASSWORD_SYMBOLS);
            required.push(PASSWORD_SYMBOLS);
        }

        if length == 0 || length < required.len() {
            return Err(DomainError::password(PasswordViolation::TooShortToGenerate));
        }

        let mut rng = OsRng;
        let mut bytes: Vec<u8> = required
            .iter()
            .filter_map(|class| class.choose(&mut rng).copied())
            .collect();
        let filler: Vec<u8> = (bytes.len()..length)
            .filter_map(|_| pool.choose(&mut rng).copied())
            .collect();
        bytes.extend(filler);
        bytes.shuffle(&mut rng);

        Ok(bytes.into_iter().map(char::from).collect())
    }

    /// Get the hash string for storage.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_hash(self) -> String {
        self.hash
    }

    /// Expiration instant, unset by default
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the owner must pick a new password, false by default
    pub fn must_change(&self) -> bool {
        self.must_change
    }

    /// True when an expiration is set and lies strictly before now.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at < clock.now())
    }

    /// Schedule expiration at `instant`.
    pub fn expire_at(&mut self, instant: DateTime<Utc>) {
        self.expires_at = Some(instant);
    }

    /// Expire immediately.
    ///
    /// Expiry is set one nanosecond before now, so `is_expired` holds at the
    /// marking instant.
    pub fn mark_expired(&mut self, clock: &dyn Clock) {
        self.expire_at(clock.now() - Duration::nanoseconds(1));
    }

    /// Remove any scheduled expiration.
    pub fn clear_expiration(&mut self) {
        self.expires_at = None;
    }

    /// Require the owner to change the password.
    pub fn force_change(&mut self) {
        self.must_change = true;
    }

    /// Lift the forced-change requirement.
    pub fn clear_must_change(&mut self) {
        self.must_change = false;
    }

    fn validate(plain_text: &str) -> Result<(), PasswordViolation> {
        if plain_text.trim().is_empty() {
            return Err(PasswordViolation::Empty);
        }

        let length = plain_text.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordViolation::TooShort);
        }
        if length >= MAX_PASSWORD_LENGTH {
            return Err(PasswordViolation::TooLong);
        }
        Ok(())
    }

    /// Hash a password using Argon2 with a fresh salt.
    fn hash_plain(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
