//! `identity code` - issue and check verification codes.

use identity_common::AppResult;
use identity_domain::{Clock, VerificationCode, VerificationState};

use super::Report;
use crate::cli::CodeAction;

/// Execute a verification code action
pub fn execute(action: CodeAction, clock: &dyn Clock) -> AppResult<Report> {
    let code = match action {
        CodeAction::Issue => {
            let mut code = VerificationCode::create(clock);
            code.activate()?;
            tracing::info!(expires_at = %code.expires_at(), "verification code issued");
            code
        }
        CodeAction::Check {
            supplied,
            issued,
            expires_at,
        } => {
            let mut code =
                VerificationCode::restore(issued, expires_at, None, VerificationState::Active)?;
            code.verify(&supplied, clock)?;
            code
        }
    };

    Ok(report(&code))
}

fn report(code: &VerificationCode) -> Report {
    Report::Code {
        code: code.code().to_string(),
        state: code.state(),
        expires_at: code.expires_at(),
        verified_at: code.verified_at(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use identity_domain::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_issue_is_active() {
        let clock = clock();
        let report = execute(CodeAction::Issue, &clock).unwrap();

        match report {
            Report::Code {
                code,
                state,
                expires_at,
                verified_at,
            } => {
                assert_eq!(code.len(), 6);
                assert_eq!(state, VerificationState::Active);
                assert_eq!(expires_at, clock.now() + Duration::minutes(5));
                assert_eq!(verified_at, None);
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_check_match() {
        let clock = clock();
        let report = execute(
            CodeAction::Check {
                supplied: "424242".into(),
                issued: "424242".into(),
                expires_at: clock.now() + Duration::minutes(5),
            },
            &clock,
        )
        .unwrap();

        match report {
            Report::Code {
                state, verified_at, ..
            } => {
                assert_eq!(state, VerificationState::Verified);
                assert_eq!(verified_at, Some(clock.now()));
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_check_rejects_mismatch_and_expiry() {
        let clock = clock();

        let err = execute(
            CodeAction::Check {
                supplied: "000000".into(),
                issued: "424242".into(),
                expires_at: clock.now() + Duration::minutes(5),
            },
            &clock,
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_VERIFICATION_CODE");

        let err = execute(
            CodeAction::Check {
                supplied: "424242".into(),
                issued: "424242".into(),
                expires_at: clock.now() - Duration::seconds(1),
            },
            &clock,
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Invalid verification code");
    }

    #[test]
    fn test_check_rejects_malformed_issued_code() {
        let clock = clock();
        let err = execute(
            CodeAction::Check {
                supplied: "abc".into(),
                issued: "abc".into(),
                expires_at: clock.now() + Duration::minutes(5),
            },
            &clock,
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_VERIFICATION_CODE");
    }
}
