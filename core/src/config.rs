//! Extraction settings.
//!
//! All fields have defaults so a TOML file only needs to name what it
//! changes:
//!
//! ```rust
//! use datagen_core::ExtractionConfig;
//!
//! let cfg = ExtractionConfig::from_toml_str("max_input_window = 3\nseed = 7").unwrap();
//! assert_eq!(cfg.max_input_window, 3);
//! assert_eq!(cfg.context_window, 10);
//! assert_eq!(cfg.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{check_probability, ConfigError};

/// Probability that a clean triple is followed by an abbreviated copy.
pub const DEFAULT_NOISE_PAIR_PROBABILITY: f64 = 0.5;

/// Probability that a single pinyin token is abbreviated inside a noisy copy.
pub const DEFAULT_NOISE_TOKEN_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of preceding characters kept as context.
    pub context_window: usize,
    /// Longest run of positions forming one training window.
    pub max_input_window: usize,
    /// Stop after this many triples (clean and noisy both count).
    pub first_n: Option<usize>,
    /// Shortest paragraph considered, start marker included.
    pub min_paragraph_len: usize,
    /// Chance of attempting a noisy copy for each clean triple.
    pub noise_pair_probability: f64,
    /// Chance that a token is abbreviated within a noisy copy.
    pub noise_token_probability: f64,
    /// Seed for the random source; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window: 10,
            max_input_window: 5,
            first_n: None,
            min_paragraph_len: 6,
            noise_pair_probability: DEFAULT_NOISE_PAIR_PROBABILITY,
            noise_token_probability: DEFAULT_NOISE_TOKEN_PROBABILITY,
            seed: None,
        }
    }
}

impl ExtractionConfig {
    /// Reject settings that would make extraction meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_window < 1 {
            return Err(ConfigError::InvalidWindow(self.max_input_window));
        }
        if self.min_paragraph_len < 1 {
            return Err(ConfigError::InvalidMinLength(self.min_paragraph_len));
        }
        check_probability("noise_pair_probability", self.noise_pair_probability)?;
        check_probability("noise_token_probability", self.noise_token_probability)?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ExtractionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.context_window, 10);
        assert_eq!(cfg.max_input_window, 5);
        assert_eq!(cfg.min_paragraph_len, 6);
        assert_eq!(cfg.first_n, None);
    }

    #[test]
    fn zero_window_rejected() {
        let cfg = ExtractionConfig {
            max_input_window: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidWindow(0))));
    }

    #[test]
    fn zero_min_length_rejected() {
        let cfg = ExtractionConfig {
            min_paragraph_len: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidMinLength(0))));
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let cfg = ExtractionConfig {
            noise_token_probability: 1.5,
            ..Default::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidProbability { name, .. }) => {
                assert_eq!(name, "noise_token_probability")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let nan = ExtractionConfig {
            noise_pair_probability: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn toml_round_trip_keeps_optional_fields() {
        let cfg = ExtractionConfig {
            first_n: Some(100),
            seed: Some(42),
            ..Default::default()
        };
        let text = cfg.to_toml_string().unwrap();
        let back = ExtractionConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn toml_file_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "datagen_config_test_{}.toml",
            std::process::id()
        ));
        let cfg = ExtractionConfig {
            context_window: 4,
            ..Default::default()
        };
        cfg.save_toml(&path).unwrap();
        let loaded = ExtractionConfig::load_toml(&path).unwrap();
        assert_eq!(loaded.context_window, 4);
        let _ = std::fs::remove_file(&path);
    }
}
