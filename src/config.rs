use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ideas::client::DEFAULT_REPO;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// `owner/name` slug of the issue tracker backing the idea board.
    #[serde(default = "default_ideas_repo")]
    pub ideas_repo: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_ideas_repo() -> String {
    DEFAULT_REPO.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            ideas_repo: default_ideas_repo(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clozer")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.ideas_repo, DEFAULT_REPO);
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(r#"theme = "catppuccin-mocha""#).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.ideas_repo, DEFAULT_REPO);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            theme: "catppuccin-mocha".to_string(),
            ideas_repo: "owner/name".to_string(),
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.ideas_repo, deserialized.ideas_repo);
    }
}
