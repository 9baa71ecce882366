//! CLI configuration
//!
//! Stored as TOML in the user config directory. `PLWORDNET_CONFIG` points
//! at a different file.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "PLWORDNET_CONFIG";

/// Snapshot backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Single binary file
    File,
    /// ReDB database
    Redb,
}

impl Backend {
    pub fn default_snapshot_name(&self) -> &'static str {
        match self {
            Self::File => "plwordnet.snap",
            Self::Redb => "plwordnet.redb",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Redb => "redb",
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "redb") {
            Self::Redb
        } else {
            Self::File
        }
    }
}

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plwordnet")
}

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plwordnet")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding snapshots
    pub data_dir: Option<PathBuf>,
    /// Snapshot file name (relative to the data directory) or path
    pub snapshot: Option<String>,
    pub backend: Backend,
    /// Parse rich descriptions on import
    pub parse_descriptions: bool,
    /// Field delimiter of the sentiment table
    pub sentiment_delimiter: char,
    /// Follow interlingual hypernymy by default
    pub interlingual: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            snapshot: None,
            backend: Backend::default(),
            parse_descriptions: true,
            sentiment_delimiter: ',',
            interlingual: false,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing or
    /// unreadable
    pub fn load() -> Self {
        let path = config_file_path();
        if !path.exists() {
            return Self::default();
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|text| toml::from_str(&text).map_err(anyhow::Error::from));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "data_dir",
            "snapshot",
            "backend",
            "parse_descriptions",
            "sentiment_delimiter",
            "interlingual",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => self.data_dir.as_ref().map(|p| p.display().to_string()),
            "snapshot" => self.snapshot.clone(),
            "backend" => Some(self.backend.as_str().to_string()),
            "parse_descriptions" => Some(self.parse_descriptions.to_string()),
            "sentiment_delimiter" => Some(self.sentiment_delimiter.escape_default().to_string()),
            "interlingual" => Some(self.interlingual.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "snapshot" => self.snapshot = Some(value.to_string()),
            "backend" => {
                self.backend = Backend::from_str(value, true)
                    .map_err(|e| anyhow::anyhow!("Invalid backend '{}': {}", value, e))?
            }
            "parse_descriptions" => self.parse_descriptions = parse_bool(key, value)?,
            "sentiment_delimiter" => self.sentiment_delimiter = parse_delimiter(value)?,
            "interlingual" => self.interlingual = parse_bool(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    /// Reset `key` to its default value
    pub fn unset(&mut self, key: &str) -> anyhow::Result<()> {
        let defaults = Self::default();
        match key {
            "data_dir" => self.data_dir = defaults.data_dir,
            "snapshot" => self.snapshot = defaults.snapshot,
            "backend" => self.backend = defaults.backend,
            "parse_descriptions" => self.parse_descriptions = defaults.parse_descriptions,
            "sentiment_delimiter" => self.sentiment_delimiter = defaults.sentiment_delimiter,
            "interlingual" => self.interlingual = defaults.interlingual,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} expects true or false, got '{}'", key, value))
}

/// A single ASCII character; `\t` and `tab` mean a tab
pub fn parse_delimiter(value: &str) -> anyhow::Result<char> {
    let delimiter = match value {
        "\\t" | "tab" => '\t',
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => anyhow::bail!("Delimiter must be a single character, got '{}'", value),
            }
        }
    };
    if !delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be an ASCII character, got '{}'", value);
    }
    Ok(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("interlingual", "true").unwrap();
        config.set("sentiment_delimiter", "tab").unwrap();
        config.set("backend", "file").unwrap();

        assert_eq!(config.get("interlingual").as_deref(), Some("true"));
        assert_eq!(config.sentiment_delimiter, '\t');
        assert_eq!(config.get("sentiment_delimiter").as_deref(), Some("\\t"));
        assert_eq!(config.backend, Backend::File);
        assert_eq!(config.get("snapshot"), None);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("interlingual", "yes").is_err());
        assert!(config.set("sentiment_delimiter", ";;").is_err());
        assert!(config.set("sentiment_delimiter", "ł").is_err());
        assert!(config.set("colour", "red").is_err());
        assert!(config.unset("colour").is_err());
    }

    #[test]
    fn test_unset_restores_default() {
        let mut config = Config::default();
        config.set("snapshot", "/srv/plwn.redb").unwrap();
        config.set("parse_descriptions", "false").unwrap();

        config.unset("snapshot").unwrap();
        config.unset("parse_descriptions").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.set("data_dir", "/tmp/wn").unwrap();
        config.set("parse_descriptions", "false").unwrap();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);

        let partial: Config = toml::from_str("interlingual = true").unwrap();
        assert!(partial.interlingual);
        assert!(partial.parse_descriptions);
    }
}
