//! `identity email` - normalise and fingerprint an address.

use identity_common::AppResult;
use identity_domain::{Clock, EmailAddress};

use super::Report;
use crate::cli::EmailArgs;

/// Execute the email command
pub fn execute(args: EmailArgs, clock: &dyn Clock) -> AppResult<Report> {
    let email = EmailAddress::create(&args.address, clock)?;
    tracing::debug!(fingerprint = email.fingerprint(), "email accepted");

    Ok(Report::Email {
        fingerprint: email.fingerprint().to_string(),
        address: email.into_string(),
    })
}
