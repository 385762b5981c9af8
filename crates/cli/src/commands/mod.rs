//! Command implementations.
//!
//! Each command returns a [`Report`]; `main` decides how to print it.

pub mod code;
pub mod email;
pub mod password;

use std::fmt;

use chrono::{DateTime, Utc};
use identity_domain::VerificationState;
use serde::Serialize;

/// Result of a command, printable as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Email {
        address: String,
        fingerprint: String,
    },
    Hash {
        hash: String,
    },
    Match {
        matches: bool,
    },
    Generated {
        password: String,
    },
    Code {
        code: String,
        state: VerificationState,
        expires_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        verified_at: Option<DateTime<Utc>>,
    },
}

impl Report {
    /// Whether the process should exit non-zero
    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Match { matches: false })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Email {
                address,
                fingerprint,
            } => write!(f, "address: {}\nfingerprint: {}", address, fingerprint),
            Report::Hash { hash } => f.write_str(hash),
            Report::Match { matches: true } => f.write_str("match"),
            Report::Match { matches: false } => f.write_str("no match"),
            Report::Generated { password } => f.write_str(password),
            Report::Code {
                code,
                state,
                expires_at,
                verified_at,
            } => {
                write!(
                    f,
                    "code: {}\nstate: {:?}\nexpires_at: {}",
                    code,
                    state,
                    expires_at.to_rfc3339()
                )?;
                if let Some(verified_at) = verified_at {
                    write!(f, "\nverified_at: {}", verified_at.to_rfc3339())?;
                }
                Ok(())
            }
        }
    }
}
