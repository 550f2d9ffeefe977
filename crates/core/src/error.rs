//! Error types for the sigil core.

use thiserror::Error;

/// Errors produced while configuring or running a generation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A configuration value was outside its documented range.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Weighted selection was asked to choose from weights summing to <= 0.
    #[error("weights must sum to a positive value, got {0}")]
    NonPositiveWeights(f64),

    /// Path text could not be split into well-formed commands.
    #[error("malformed path data: {0}")]
    MalformedPath(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An exclusion mask had the wrong shape or unknown cell markers.
    #[error("invalid exclusion mask: {0}")]
    InvalidMask(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidConfig`].
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
