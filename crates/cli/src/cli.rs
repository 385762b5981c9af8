//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

/// Identity value-object toolkit
#[derive(Parser, Debug)]
#[command(name = "identity")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalise and fingerprint an email address
    Email(EmailArgs),

    /// Hash, verify or generate passwords
    Password(PasswordArgs),

    /// Issue or check verification codes
    Code(CodeArgs),
}

/// Arguments for the email command
#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Raw address (surrounding whitespace and case are normalised)
    pub address: String,
}

/// Arguments for the password command
#[derive(Args, Debug)]
pub struct PasswordArgs {
    #[command(subcommand)]
    pub action: PasswordAction,
}

/// Password actions
#[derive(Subcommand, Debug)]
pub enum PasswordAction {
    /// Validate strength and print the hash
    Hash {
        /// Plain text password
        plain: String,
    },
    /// Check a plain text against a stored hash
    Verify {
        /// Stored PHC hash string
        hash: String,
        /// Plain text password
        plain: String,
    },
    /// Generate a temporary password
    Generate {
        /// Number of characters (defaults to configuration)
        #[arg(short, long)]
        length: Option<usize>,
        /// Do not require an uppercase letter
        #[arg(long)]
        no_uppercase: bool,
        /// Do not require a symbol
        #[arg(long)]
        no_symbols: bool,
    },
}

/// Arguments for the code command
#[derive(Args, Debug)]
pub struct CodeArgs {
    #[command(subcommand)]
    pub action: CodeAction,
}

/// Verification code actions
#[derive(Subcommand, Debug)]
pub enum CodeAction {
    /// Issue and activate a new code
    Issue,
    /// Verify a supplied code against an issued, active one
    Check {
        /// Code supplied by the user
        supplied: String,
        /// Code that was issued
        issued: String,
        /// Expiry of the issued code (RFC 3339)
        expires_at: DateTime<Utc>,
    },
}
