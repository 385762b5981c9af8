//! Verification code value object.
//!
//! A six-digit, time-boxed, single-use code. Lifecycle:
//! `Inactive` (created) -> `Active` (sent to the user) -> `Verified` (terminal).
//! Expiry is not a stored state; it is computed against the injected clock.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::constants::{VERIFICATION_CODE_LENGTH, VERIFICATION_CODE_TTL_MINUTES};
use crate::error::{CodeRejection, DomainError, DomainResult};

/// Stored lifecycle state of a verification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationState {
    Inactive,
    Active,
    Verified,
}

/// Time-boxed, single-use numeric code.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode {
    code: String,
    expires_at: DateTime<Utc>,
    verified_at: Option<DateTime<Utc>>,
    state: VerificationState,
}

// Keep the code itself out of logs
impl std::fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationCode")
            .field("code", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("verified_at", &self.verified_at)
            .field("state", &self.state)
            .finish()
    }
}

impl VerificationCode {
    /// Issue a fresh, inactive code valid for five minutes from now.
    pub fn create(clock: &dyn Clock) -> Self {
        let mut rng = OsRng;
        let code = (0..VERIFICATION_CODE_LENGTH)
            .map(|_| char::from(rng.gen_range(b'0'..=b'9')))
            .collect();

        Self {
            code,
            expires_at: clock.now() + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES),
            verified_at: None,
            state: VerificationState::Inactive,
        }
    }

    /// Rebuild a code from storage.
    ///
    /// # Errors
    /// Returns `CodeRejection::Malformed` if the code is not six ASCII digits
    /// or if `verified_at` disagrees with `state`.
    pub fn restore(
        code: impl Into<String>,
        expires_at: DateTime<Utc>,
        verified_at: Option<DateTime<Utc>>,
        state: VerificationState,
    ) -> DomainResult<Self> {
        let code = code.into();
        let well_formed = code.len() == VERIFICATION_CODE_LENGTH
            && code.bytes().all(|b| b.is_ascii_digit());
        let consistent = verified_at.is_some() == (state == VerificationState::Verified);

        if !well_formed || !consistent {
            return Err(DomainError::verification(CodeRejection::Malformed));
        }

        Ok(Self {
            code,
            expires_at,
            verified_at,
            state,
        })
    }

    /// Move an inactive code to active.
    ///
    /// Activating an already active code is a no-op. A verified code stays
    /// terminal and cannot be re-activated.
    ///
    /// # Errors
    /// Returns `CodeRejection::AlreadyVerified` for a verified code.
    pub fn activate(&mut self) -> DomainResult<()> {
        match self.state {
            VerificationState::Inactive => {
                self.state = VerificationState::Active;
                Ok(())
            }
            VerificationState::Active => Ok(()),
            VerificationState::Verified => {
                tracing::debug!("activation refused on verified code");
                Err(DomainError::verification(CodeRejection::AlreadyVerified))
            }
        }
    }

    /// Consume the code.
    ///
    /// Succeeds at most once: the code must be active, the supplied value must
    /// match exactly and the current instant must lie before `expires_at`.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidVerificationCode` with the rejection
    /// reason; the instance is left untouched on failure.
    pub fn verify(&mut self, supplied: &str, clock: &dyn Clock) -> DomainResult<()> {
        let now = clock.now();

        if let Some(reason) = self.rejection(supplied, now) {
            tracing::debug!(?reason, "verification code rejected");
            return Err(DomainError::verification(reason));
        }

        self.verified_at = Some(now);
        self.state = VerificationState::Verified;
        Ok(())
    }

    fn rejection(&self, supplied: &str, now: DateTime<Utc>) -> Option<CodeRejection> {
        match self.state {
            VerificationState::Inactive => return Some(CodeRejection::NotActive),
            VerificationState::Verified => return Some(CodeRejection::AlreadyVerified),
            VerificationState::Active => {}
        }
        if supplied.is_empty() {
            return Some(CodeRejection::Empty);
        }
        if now >= self.expires_at {
            return Some(CodeRejection::Expired);
        }
        if !constant_time_eq(supplied.as_bytes(), self.code.as_bytes()) {
            return Some(CodeRejection::Mismatch);
        }
        None
    }

    /// The issued digits
    pub fn code(&self) -> &str {
        &self.code
    }

    /// End of the validity window
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// When the code was consumed, if ever
    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }

    /// Stored lifecycle state
    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// Whether the code can currently be verified (ignoring expiry)
    pub fn is_active(&self) -> bool {
        self.state == VerificationState::Active
    }

    /// Whether the code has been consumed
    pub fn is_verified(&self) -> bool {
        self.state == VerificationState::Verified
    }

    /// True once the clock reaches `expires_at`.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        clock.now() >= self.expires_at
    }
}

/// Length check leaks only the length, which is public (always six).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, MockClock};
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn clock_at(instant: DateTime<Utc>) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(instant);
        clock
    }

    fn rejection(result: DomainResult<()>) -> CodeRejection {
        match result {
            Err(DomainError::InvalidVerificationCode(reason)) => reason,
            other => panic!("expected verification error, got {other:?}"),
        }
    }

    fn active_code(clock: &dyn Clock) -> VerificationCode {
        let mut code = VerificationCode::create(clock);
        code.activate().unwrap();
        code
    }

    #[test]
    fn test_generates_six_digits() {
        let code = VerificationCode::create(&clock_at(noon()));

        assert_eq!(code.code().len(), 6);
        assert!(code.code().bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_expires_five_minutes_after_creation() {
        let mut clock = MockClock::new();
        clock.expect_now().times(1).return_const(noon());

        let code = VerificationCode::create(&clock);
        assert_eq!(code.expires_at(), noon() + Duration::minutes(5));
        assert!(code.expires_at() > noon());
    }

    #[test]
    fn test_initial_state() {
        let code = VerificationCode::create(&clock_at(noon()));

        assert_eq!(code.verified_at(), None);
        assert!(!code.is_active());
        assert!(!code.is_verified());
        assert_eq!(code.state(), VerificationState::Inactive);
    }

    #[test]
    fn test_fails_if_not_active() {
        let clock = clock_at(noon());
        let mut code = VerificationCode::create(&clock);
        let digits = code.code().to_string();

        assert_eq!(rejection(code.verify(&digits, &clock)), CodeRejection::NotActive);
        assert_eq!(code.state(), VerificationState::Inactive);
    }

    #[test]
    fn test_fails_if_empty() {
        let clock = clock_at(noon());
        let mut code = active_code(&clock);

        assert_eq!(rejection(code.verify("", &clock)), CodeRejection::Empty);
    }

    #[test]
    fn test_fails_if_code_does_not_match() {
        let clock = clock_at(noon());
        let mut code = active_code(&clock);

        assert_eq!(rejection(code.verify("WRONGCODE", &clock)), CodeRejection::Mismatch);
        assert!(code.is_active());
        assert_eq!(code.verified_at(), None);
    }

    #[test]
    fn test_match_is_case_and_whitespace_exact() {
        let clock = clock_at(noon());
        let mut code = active_code(&clock);
        let padded = format!(" {}", code.code());

        assert_eq!(rejection(code.verify(&padded, &clock)), CodeRejection::Mismatch);
    }

    #[test]
    fn test_verifies_once() {
        let clock = FixedClock::at(noon());
        let mut code = active_code(&clock);
        let digits = code.code().to_string();

        clock.advance(Duration::minutes(1));
        code.verify(&digits, &clock).unwrap();
        assert!(code.is_verified());
        assert_eq!(code.verified_at(), Some(noon() + Duration::minutes(1)));

        assert_eq!(
            rejection(code.verify(&digits, &clock)),
            CodeRejection::AlreadyVerified
        );
        assert_eq!(code.verified_at(), Some(noon() + Duration::minutes(1)));
    }

    #[test]
    fn test_fails_after_expiry() {
        let clock = FixedClock::at(noon());
        let mut code = active_code(&clock);
        let digits = code.code().to_string();

        clock.advance(Duration::minutes(6));
        assert!(code.is_expired(&clock));
        assert_eq!(rejection(code.verify(&digits, &clock)), CodeRejection::Expired);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let clock = FixedClock::at(noon());
        let mut code = active_code(&clock);
        let digits = code.code().to_string();

        clock.set(code.expires_at());
        assert_eq!(rejection(code.verify(&digits, &clock)), CodeRejection::Expired);

        clock.set(code.expires_at() - Duration::milliseconds(1));
        assert!(code.verify(&digits, &clock).is_ok());
    }

    #[test]
    fn test_activate_is_idempotent_until_verified() {
        let clock = clock_at(noon());
        let mut code = VerificationCode::create(&clock);

        code.activate().unwrap();
        code.activate().unwrap();
        assert!(code.is_active());

        let digits = code.code().to_string();
        code.verify(&digits, &clock).unwrap();
        assert_eq!(rejection(code.activate()), CodeRejection::AlreadyVerified);
        assert!(code.is_verified());
    }

    #[test]
    fn test_restore_validates_shape() {
        let expires = noon();

        let code =
            VerificationCode::restore("012345", expires, None, VerificationState::Active).unwrap();
        assert_eq!(code.code(), "012345");
        assert!(code.is_active());

        for bad in ["12345", "1234567", "12a456", ""] {
            let result = VerificationCode::restore(bad, expires, None, VerificationState::Active);
            assert_eq!(
                result.unwrap_err(),
                DomainError::verification(CodeRejection::Malformed)
            );
        }
    }

    #[test]
    fn test_restore_checks_verified_consistency() {
        let expires = noon();

        assert!(
            VerificationCode::restore("123456", expires, None, VerificationState::Verified)
                .is_err()
        );
        assert!(VerificationCode::restore(
            "123456",
            expires,
            Some(noon()),
            VerificationState::Active
        )
        .is_err());

        let verified = VerificationCode::restore(
            "123456",
            expires,
            Some(noon() - Duration::minutes(1)),
            VerificationState::Verified,
        )
        .unwrap();
        assert!(verified.is_verified());
    }

    #[test]
    fn test_debug_redacts_code() {
        let code = VerificationCode::restore("987654", noon(), None, VerificationState::Inactive)
            .unwrap();
        let debug = format!("{code:?}");

        assert!(!debug.contains("987654"));
        assert!(debug.contains("Inactive"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"123456", b"123456"));
        assert!(!constant_time_eq(b"123456", b"123457"));
        assert!(!constant_time_eq(b"123456", b"12345"));
    }
}
