//! Out-of-band configuration of the service base address.
//!
//! Priority: `DATABRIEF_API_URL` environment variable, then
//! `~/.config/databrief/config.json`, then the local default.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Base address used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding every other source.
pub const BASE_URL_ENV: &str = "DATABRIEF_API_URL";

/// Root structure of config.json
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

/// Resolves the service base address from the environment, the config
/// file, or the default, in that order.
pub fn resolve_base_url() -> String {
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            return url;
        }
    }

    match load_config() {
        Ok(config) => config.base_url,
        Err(reason) => {
            tracing::debug!(target: "service", "No usable config file: {reason}");
            DEFAULT_BASE_URL.to_string()
        }
    }
}

/// Loads the configuration file from ~/.config/databrief/config.json
pub fn load_config() -> Result<ServiceConfig, String> {
    let config_path = config_path()?;

    if !config_path.exists() {
        return Err(format!(
            "Configuration file not found at: {}",
            config_path.display()
        ));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        )
    })?;

    parse_config(&content).map_err(|e| {
        format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        )
    })
}

fn parse_config(content: &str) -> Result<ServiceConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Returns the path to the configuration file: ~/.config/databrief/config.json
fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home.join(".config").join("databrief").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_body() {
        let config = parse_config(r#"{"base_url": "https://brief.example.com"}"#).unwrap();
        assert_eq!(config.base_url, "https://brief.example.com");
    }

    #[test]
    fn rejects_malformed_body() {
        assert!(parse_config("not json").is_err());
    }
}
