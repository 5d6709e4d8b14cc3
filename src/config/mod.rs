//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::combinations::{MAX_COMBINATION_SIZE, MIN_COMBINATION_SIZE};
use crate::calculate::normalize::is_valid_quarter;
use crate::models::{ClubId, Position, TeamId};

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

/// Analysis defaults used when the command line does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Team whose performance is analysed
    #[serde(default)]
    pub current_team_id: Option<TeamId>,

    /// Club owning the current team, used when the team data does not record one
    #[serde(default)]
    pub club_id: Option<ClubId>,

    /// Players per combination (2 to 5)
    #[serde(default = "default_combination_size")]
    pub combination_size: usize,

    /// Restrict combinations to players who held one of these positions
    #[serde(default)]
    pub position_filter: Vec<Position>,

    /// Restrict formations to a single quarter
    #[serde(default)]
    pub quarter: Option<u8>,
}

fn default_combination_size() -> usize {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            current_team_id: None,
            club_id: None,
            combination_size: default_combination_size(),
            position_filter: Vec::new(),
            quarter: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            analysis: AnalysisConfig::default(),
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

    /// Load configuration if the file exists, otherwise use defaults.
    pub fn load_or_default(path: &PathBuf) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.analysis.combination_size;
        if !(MIN_COMBINATION_SIZE..=MAX_COMBINATION_SIZE).contains(&size) {
            return Err(ConfigError::ValidationError(format!(
                "Combination size must be between {} and {}, got {}",
                MIN_COMBINATION_SIZE, MAX_COMBINATION_SIZE, size
            )));
        }

        if let Some(quarter) = self.analysis.quarter {
            if !is_valid_quarter(quarter) {
                return Err(ConfigError::ValidationError(format!(
                    "Quarter must be between 1 and 4, got {}",
                    quarter
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analysis.combination_size, 3);
        assert!(config.analysis.position_filter.is_empty());
        assert_eq!(config.analysis.current_team_id, None);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_combination_size() {
        let mut config = AppConfig::default();
        config.analysis.combination_size = 6;
        assert!(config.validate().is_err());

        config.analysis.combination_size = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_quarter() {
        let mut config = AppConfig::default();
        config.analysis.quarter = Some(5);
        assert!(config.validate().is_err());

        config.analysis.quarter = Some(4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            data_dir = "/srv/netball"

            [analysis]
            current_team_id = 100
            club_id = 3
            combination_size = 2
            position_filter = ["GS", "GA"]
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/netball"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analysis.current_team_id, Some(100));
        assert_eq!(config.analysis.club_id, Some(3));
        assert_eq!(
            config.analysis.position_filter,
            vec![Position::GS, Position::GA]
        );
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\ncombination_size = 9\n").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.analysis.combination_size, 3);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
    }
}
