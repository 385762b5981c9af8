//! Process configuration loaded from environment variables.
//!
//! Password strength bounds are domain constants, not settings; only
//! operational knobs live here.

use std::env;
use std::str::FromStr;

use identity_domain::DEFAULT_GENERATED_PASSWORD_LENGTH;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default log filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_LOG_LEVEL: &str = "IDENTITY_LOG_LEVEL";
pub const ENV_GENERATED_PASSWORD_LENGTH: &str = "IDENTITY_GENERATED_PASSWORD_LENGTH";
pub const ENV_GENERATED_PASSWORD_UPPERCASE: &str = "IDENTITY_GENERATED_PASSWORD_UPPERCASE";
pub const ENV_GENERATED_PASSWORD_SYMBOLS: &str = "IDENTITY_GENERATED_PASSWORD_SYMBOLS";

/// Defaults for temporary password generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Number of characters
    pub length: usize,
    /// Guarantee at least one uppercase letter
    pub include_uppercase: bool,
    /// Guarantee at least one symbol
    pub include_symbols: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_GENERATED_PASSWORD_LENGTH,
            include_uppercase: true,
            include_symbols: true,
        }
    }
}

/// Identity tooling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Log level / `EnvFilter` directive
    pub log_level: String,
    /// Temporary password defaults
    pub generator: GeneratorConfig,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl IdentityConfig {
    /// Load configuration from the process environment (and `.env`, if any).
    ///
    /// # Errors
    /// Returns `AppError::Config` when a variable is set but cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            log_level: lookup(ENV_LOG_LEVEL)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
            generator: GeneratorConfig {
                length: parse_var(&lookup, ENV_GENERATED_PASSWORD_LENGTH)?
                    .unwrap_or(defaults.generator.length),
                include_uppercase: parse_flag(&lookup, ENV_GENERATED_PASSWORD_UPPERCASE)?
                    .unwrap_or(defaults.generator.include_uppercase),
                include_symbols: parse_flag(&lookup, ENV_GENERATED_PASSWORD_SYMBOLS)?
                    .unwrap_or(defaults.generator.include_symbols),
            },
        };

        if config.generator.length == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                ENV_GENERATED_PASSWORD_LENGTH
            )));
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| AppError::config(format!("{} has invalid value '{}'", key, raw)))
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &str) -> AppResult<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::config(format!("{} has invalid value '{}'", key, raw))),
        })
        .transpose()
}
