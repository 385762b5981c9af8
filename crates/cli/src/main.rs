//! Identity CLI - Application entry point
//!
//! CLI-based entry point that dispatches to the value-object commands.

mod cli;
mod commands;

use clap::Parser;
use identity_common::{init_tracing, AppError, AppResult, IdentityConfig};
use identity_domain::SystemClock;

use crate::cli::{Cli, Commands};
use crate::commands::Report;

fn main() {
    // Parse CLI arguments
    let Cli {
        verbose,
        json,
        command,
    } = Cli::parse();

    // Load configuration, then initialize tracing from it
    let outcome = IdentityConfig::from_env().and_then(|config| {
        init_tracing(verbose, &config.log_level);
        tracing::debug!(?config, "Configuration loaded");

        let report = run(command, &config)?;
        print(&report, json)?;
        Ok(report)
    });

    // Handle errors
    if let Err(e) = &outcome {
        tracing::debug!(code = e.code(), "Command failed");
        eprintln!("error: {}", e.user_message());
    }
    std::process::exit(exit_code(&outcome));
}

/// Execute a command
fn run(command: Commands, config: &IdentityConfig) -> AppResult<Report> {
    let clock = SystemClock;
    match command {
        Commands::Email(args) => commands::email::execute(args, &clock),
        Commands::Password(args) => commands::password::execute(args.action, &config.generator),
        Commands::Code(args) => commands::code::execute(args.action, &clock),
    }
}

fn print(report: &Report, json: bool) -> AppResult<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).map_err(|e| AppError::internal(e.to_string()))?;
        println!("{}", rendered);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// Any error, and a negative report such as a password mismatch, exits 1.
fn exit_code(outcome: &AppResult<Report>) -> i32 {
    match outcome {
        Ok(report) if report.is_failure() => 1,
        Ok(_) => 0,
        Err(_) => 1,
    }
}
