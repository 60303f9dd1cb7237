//! Configuration loading and validation.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::PredictionConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Largest accepted source weight. Beyond it a weight no longer converts
/// to a decimal.
const MAX_WEIGHT: f64 = 1_000_000.0;

/// Largest accepted pseudo-count, so the smoothed total of a LONG sample
/// stays far inside `u32`.
const MAX_SMOOTHING: u32 = 1_000_000;

/// History and progress settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Matches per point of a rolling history
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Offset from UTC used to decide which day a match was played on
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_chunk_size() -> usize {
    10
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            utc_offset_minutes: 0,
        }
    }
}

impl HistoryConfig {
    /// The configured offset, or UTC if it is out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON Lines file holding match results
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default)]
    pub prediction: PredictionConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/matches.jsonl")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_file: default_data_file(),
            prediction: PredictionConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("head_to_head_weight", self.prediction.head_to_head_weight),
            ("player_weight", self.prediction.player_weight),
            ("opponent_weight", self.prediction.opponent_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || !(0.0..=MAX_WEIGHT).contains(&weight) {
                return Err(ConfigError::ValidationError(format!(
                    "Prediction {} must be between 0 and {}, got {}",
                    name, MAX_WEIGHT, weight
                )));
            }
        }

        if !(1..=MAX_SMOOTHING).contains(&self.prediction.smoothing) {
            return Err(ConfigError::ValidationError(format!(
                "Prediction smoothing must be between 1 and {}, got {}",
                MAX_SMOOTHING, self.prediction.smoothing
            )));
        }

        if self.history.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "History chunk size must be greater than 0".to_string(),
            ));
        }

        if self.history.utc_offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(ConfigError::ValidationError(format!(
                "UTC offset must be within 24 hours, got {} minutes",
                self.history.utc_offset_minutes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_file, PathBuf::from("./data/matches.jsonl"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.prediction.head_to_head_weight, 2.0);
        assert_eq!(config.prediction.player_weight, 0.5);
        assert_eq!(config.prediction.smoothing, 1);
        assert_eq!(config.history.chunk_size, 10);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_weight() {
        let mut config = AppConfig::default();
        config.prediction.opponent_weight = -0.5;
        assert!(config.validate().is_err());

        config.prediction.opponent_weight = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_weight_upper_bound() {
        let mut config = AppConfig::default();
        config.prediction.head_to_head_weight = MAX_WEIGHT;
        assert!(config.validate().is_ok());

        config.prediction.head_to_head_weight = 1e30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_smoothing() {
        let mut config = AppConfig::default();
        config.prediction.smoothing = 0;
        assert!(config.validate().is_err());

        config.prediction.smoothing = MAX_SMOOTHING;
        assert!(config.validate().is_ok());

        config.prediction.smoothing = 200_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_chunk() {
        let mut config = AppConfig::default();
        config.history.chunk_size = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_offset() {
        let mut config = AppConfig::default();
        config.history.utc_offset_minutes = 24 * 60;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_history_offset() {
        let history = HistoryConfig {
            chunk_size: 5,
            utc_offset_minutes: -90,
        };
        assert_eq!(history.offset().local_minus_utc(), -90 * 60);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[prediction]\nhead_to_head_weight = 3.0\n\n[history]\nutc_offset_minutes = 180"
        )
        .unwrap();

        let config = AppConfig::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.prediction.head_to_head_weight, 3.0);
        assert_eq!(config.prediction.player_weight, 0.5);
        assert_eq!(config.history.chunk_size, 10);
        assert_eq!(config.history.utc_offset_minutes, 180);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[history]\nchunk_size = 0").unwrap();

        let err = AppConfig::from_file(&file.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_file, parsed.data_file);
        assert_eq!(config.prediction, parsed.prediction);
    }
}
