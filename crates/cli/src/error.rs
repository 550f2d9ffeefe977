//! CLI failures and their process exit codes.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 2    | argument parse error (reported by clap) |
//! | 10   | generation rejected the config or failed internally |
//! | 11   | reading the glyph file or writing the output failed |
//! | 12   | `--params` or the glyph file is not usable |
//! | 13   | the artwork could not be serialized |

use sigil_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(EngineError),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl From<EngineError> for CliError {
    /// Mask errors only come from user-supplied glyph files, so they count as
    /// bad input rather than a generation failure.
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidMask(msg) => CliError::Input(format!("invalid glyph mask: {msg}")),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_10() {
        let err = CliError::from(EngineError::config("gridSize", "must be in 2..=50, got 1"));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("gridSize"));
    }

    #[test]
    fn weight_errors_exit_with_10() {
        assert_eq!(CliError::from(EngineError::NonPositiveWeights(0.0)).exit_code(), 10);
    }

    #[test]
    fn file_errors_exit_with_11() {
        let err = CliError::Io("cannot write art.json: permission denied".into());
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "cannot write art.json: permission denied");
    }

    #[test]
    fn glyph_mask_errors_exit_with_12() {
        let err = CliError::from(EngineError::InvalidMask("found 2 rows, expected 8".into()));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("2 rows"));
    }

    #[test]
    fn bad_params_exit_with_12() {
        assert_eq!(CliError::Input("invalid --params JSON".into()).exit_code(), 12);
    }

    #[test]
    fn serde_failures_exit_with_13() {
        let parse = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        assert_eq!(CliError::from(parse).exit_code(), 13);
    }
}
