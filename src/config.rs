//! Configuration management for Gamepad GW
//!
//! Handles loading and parsing of the YAML configuration file. Every field
//! has a default, so a missing file yields a fully working configuration
//! (console-friendly Live target, gamepad input enabled, factory bindings).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::fs;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub live: LiveConfig,
    #[serde(default)]
    pub gamepad: GamepadConfig,
    /// Binding overrides: element identifier -> action name
    /// (e.g. `buttonMenu: transportRedo`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub bindings: HashMap<String, String>,
}

/// AbletonOSC endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LiveConfig {
    /// When false, actions are logged to the console instead of sent to Live
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_live_host")]
    pub host: String,
    #[serde(default = "default_live_port")]
    pub port: u16,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self { enabled: true, host: default_live_host(), port: default_live_port() }
    }
}

/// Gamepad input configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GamepadConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Case-insensitive substring match on the controller product name;
    /// when unset, the first controller with the extended profile wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_match: Option<String>,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self { enabled: true, product_match: None }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML config: {}", path))?;

        Ok(config)
    }

    /// Load configuration from file, falling back to defaults when absent
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub async fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_live_host() -> String {
    "127.0.0.1".to_string()
}
fn default_live_port() -> u16 {
    11000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.live.enabled);
        assert_eq!(config.live.host, "127.0.0.1");
        assert_eq!(config.live.port, 11000);
        assert!(config.gamepad.enabled);
        assert_eq!(config.gamepad.product_match, None);
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
live:
  port: 11001
gamepad:
  product_match: "DualSense"
bindings:
  buttonMenu: transportRedo
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.live.enabled);
        assert_eq!(config.live.port, 11001);
        assert_eq!(config.live.host, "127.0.0.1");
        assert_eq!(config.gamepad.product_match.as_deref(), Some("DualSense"));
        assert_eq!(config.bindings.get("buttonMenu").map(String::as_str), Some("transportRedo"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "live:\n  enabled: false").unwrap();

        let config = AppConfig::load(file.path().to_str().unwrap()).await.unwrap();
        assert!(!config.live.enabled);
        assert!(config.gamepad.enabled);
    }

    #[tokio::test]
    async fn test_load_or_default_with_missing_file() {
        let config = AppConfig::load_or_default("/nonexistent/gamepad-gw.yaml").await.unwrap();
        assert!(config.live.enabled);
    }
}
