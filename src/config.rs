// ABOUTME: Configuration loading for parlor.
// ABOUTME: Reads ~/.parlor/config.toml and provides the standard file paths.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
        }
    }
}

/// Remote assistant service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

impl Config {
    /// Load config from ~/.parlor/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn home_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        Self::home_dir().join(".parlor").join("config.toml")
    }

    /// Path to the persisted token store.
    pub fn tokens_path() -> PathBuf {
        Self::home_dir().join(".parlor").join("tokens.json")
    }

    /// Path to the log file. Logs go to a file so the alternate screen
    /// stays clean while the TUI runs.
    pub fn log_path() -> PathBuf {
        Self::home_dir().join(".parlor").join("parlor.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn parse_config_toml() {
        let toml_str = r#"
[server]
base_url = "https://assistant.example.com"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "https://assistant.example.com");
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
    }
}
