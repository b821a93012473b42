//! Configuration management for the health log
//!
//! TOML-based configuration with built-in defaults and validation.
//! Location: ~/.health-log/config.toml (or `--config PATH`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{AppError, Result};
use crate::record::{DIASTOLIC, HEIGHT_CM, SYSTOLIC, WEIGHT_KG};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: FormDefaults,
    pub logging: LoggingConfig,
}

/// Initial values of the entry form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub systolic: u16,
    pub diastolic: u16,
}

/// Log file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            height_cm: 170.0,
            weight_kg: 65.0,
            systolic: 120,
            diastolic: 80,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: "~/.health-log/logs".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Log directory with a leading `~` expanded to the home directory
    pub fn resolved_log_dir(&self) -> PathBuf {
        expand_home(&self.log_dir)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate TOML contents
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".health-log").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let d = &self.defaults;

        if !HEIGHT_CM.contains(d.height_cm) {
            return Err(AppError::Config(format!(
                "height_cm must be between {} and {}",
                HEIGHT_CM.min, HEIGHT_CM.max
            )));
        }

        if !WEIGHT_KG.contains(d.weight_kg) {
            return Err(AppError::Config(format!(
                "weight_kg must be between {} and {}",
                WEIGHT_KG.min, WEIGHT_KG.max
            )));
        }

        if !SYSTOLIC.contains(f64::from(d.systolic)) {
            return Err(AppError::Config(format!(
                "systolic must be between {} and {}",
                SYSTOLIC.min, SYSTOLIC.max
            )));
        }

        if !DIASTOLIC.contains(f64::from(d.diastolic)) {
            return Err(AppError::Config(format!(
                "diastolic must be between {} and {}",
                DIASTOLIC.min, DIASTOLIC.max
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "logging.level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.defaults.height_cm, 170.0);
        assert_eq!(config.defaults.weight_kg, 65.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [defaults]
            weight_kg = 72.5
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.weight_kg, 72.5);
        assert_eq!(config.defaults.height_cm, 170.0);
        assert_eq!(config.defaults.systolic, 120);
        assert_eq!(config.logging.log_dir, "~/.health-log/logs");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.defaults.diastolic, 80);
    }

    #[test]
    fn test_out_of_range_default_rejected() {
        let err = Config::from_toml("[defaults]\nheight_cm = 90.0\n").unwrap_err();
        assert!(err.to_string().contains("height_cm"));

        let err = Config::from_toml("[defaults]\nsystolic = 250\n").unwrap_err();
        assert!(err.to_string().contains("systolic"));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = Config::from_toml("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = Config::from_toml("[defaults\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Some(Path::new("/nonexistent/health-log.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/log"), PathBuf::from("/var/log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/logs"), home.join("logs"));
        }
    }
}
