//! Error types for ridepolicy

use thiserror::Error;

/// Core error type for ridepolicy operations
#[derive(Debug, Error)]
pub enum RidePolicyError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    #[error("Invalid time '{value}': expected {expected}")]
    InvalidTime { value: String, expected: &'static str },
}

impl RidePolicyError {
    pub fn unknown_setting(key: impl Into<String>) -> Self {
        Self::UnknownSetting(key.into())
    }

    pub fn invalid_setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RidePolicyError>;
