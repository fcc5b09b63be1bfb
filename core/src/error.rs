//! Error types for configuration handling.
//!
//! Data anomalies (misaligned pairs, short paragraphs, rejected noise) are
//! never reported through these types; they are logged and skipped.

use thiserror::Error;

/// Fatal configuration problems, surfaced before any extraction work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `max_input_window` must admit at least one position.
    #[error("max_input_window must be >= 1 (got {0})")]
    InvalidWindow(usize),

    /// `min_paragraph_len` counts the start marker and must be >= 1.
    #[error("min_paragraph_len must be >= 1 (got {0})")]
    InvalidMinLength(usize),

    /// A probability setting outside `[0, 1]` (or NaN).
    #[error("{name} must lie in [0, 1] (got {value})")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Check that `value` is a usable probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}
