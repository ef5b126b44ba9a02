//! Scheduling policy configuration for ridepolicy
//!
//! Provides:
//! - The `SchedulingPolicy` record and its compiled-in defaults
//! - Shallow merging of stored JSON over those defaults
//! - TOML policy files for administrators
//! - Validation with clear error messages

mod policy;
mod schema;
mod validation;

pub use policy::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read policy file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported policy file version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported policy file version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate a policy file
pub fn load_policy_file(path: impl AsRef<Path>) -> ConfigResult<SchedulingPolicy> {
    let content = std::fs::read_to_string(path)?;
    parse_policy_file(&content)
}

/// Parse and validate a policy file from a TOML string
pub fn parse_policy_file(content: &str) -> ConfigResult<SchedulingPolicy> {
    let raw: RawPolicyFile = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let policy = SchedulingPolicy::from_raw(raw);

    let errors = validate_policy(&policy);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(policy)
}
