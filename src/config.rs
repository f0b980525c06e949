use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the Den proxy server (the process holding the model API key)
    #[serde(default = "default_server_url")]
    pub den_server_url: String,

    /// Directory holding the persisted favorites and watch history
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default)]
    pub den_data_dir: Option<String>,

    /// Transport-level timeout for proxy requests, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Resolved directory for persisted collections
    pub fn data_dir(&self) -> PathBuf {
        match &self.den_data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("movie-den"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_prefers_explicit_setting() {
        let config = Config {
            den_server_url: default_server_url(),
            den_data_dir: Some("/tmp/den-test".to_string()),
            request_timeout_secs: 30,
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/den-test"));
    }

    #[test]
    fn test_data_dir_falls_back_to_platform_dir() {
        let config = Config {
            den_server_url: default_server_url(),
            den_data_dir: None,
            request_timeout_secs: 30,
        };
        assert!(config.data_dir().ends_with("movie-den"));
    }
}
