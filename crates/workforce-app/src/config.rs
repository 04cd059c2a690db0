//! Configuration management for the workforce ledger
//!
//! Config stored at: ~/.config/workforce/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use workforce_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Currency label shown next to money amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_currency() -> String {
    "SAR".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_format: default_output_format(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("workforce");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding the snapshot file
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("workforce");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Workforce Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Currency:       {}", self.currency)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml("output_format = \"json\"\n").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.currency, "SAR");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/workforce")),
            output_format: OutputFormat::Json,
            currency: "USD".to_string(),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = Config::from_toml("output_format = 5").unwrap_err();
        assert!(matches!(err, workforce_types::Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/data")),
            ..Default::default()
        };
        assert_eq!(config.store_dir().unwrap(), PathBuf::from("/srv/data"));
    }
}
