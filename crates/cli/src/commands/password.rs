//! `identity password` - hash, verify and generate credentials.

use identity_common::{AppResult, GeneratorConfig};
use identity_domain::Password;

use super::Report;
use crate::cli::PasswordAction;

/// Execute a password action
pub fn execute(action: PasswordAction, defaults: &GeneratorConfig) -> AppResult<Report> {
    match action {
        PasswordAction::Hash { plain } => {
            let password = Password::create(&plain)?;
            Ok(Report::Hash {
                hash: password.into_hash(),
            })
        }
        PasswordAction::Verify { hash, plain } => {
            let matches = Password::matches(&hash, &plain);
            tracing::debug!(matches, "password checked");
            Ok(Report::Match { matches })
        }
        PasswordAction::Generate {
            length,
            no_uppercase,
            no_symbols,
        } => {
            let password = Password::generate(
                length.unwrap_or(defaults.length),
                defaults.include_uppercase && !no_uppercase,
                defaults.include_symbols && !no_symbols,
            )?;
            Ok(Report::Generated { password })
        }
    }
}
