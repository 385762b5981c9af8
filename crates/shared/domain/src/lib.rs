//! Identity domain - Self-validating identity value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! an email address, a password credential and a time-boxed verification
//! code. Every constructor either returns a valid instance or a typed
//! [`DomainError`]; time always comes from an injected [`Clock`].

pub mod clock;
pub mod constants;
pub mod email;
pub mod encoding;
pub mod error;
pub mod password;
pub mod verification;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use email::EmailAddress;
pub use encoding::{encode_base64, ToBase64};
pub use error::{CodeRejection, DomainError, DomainResult, PasswordViolation};
pub use password::Password;
pub use verification::{VerificationCode, VerificationState};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::MockClock;
