use crate::{configuration::*, products::unexpected::ConfigError, utilities::*, *};
use serde::{Deserialize, Serialize};
use std::{env, path::Path, time::Duration};
use tracing::level_filters::LevelFilter;


#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
/// Dynamic configuration read on demand by the client
pub struct Config {
    /// Base URL of the diagnostics server, ex. "http://10.0.0.1:8080"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Log level: OFF, ERROR, WARN, INFO, DEBUG, TRACE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Connection timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout: Option<u64>,

    /// Maximum idle Curl handles kept for reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_handles: Option<usize>,

    /// HTTP agent name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Top-level metric keys skipped while flattening metric groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_metric_keys: Option<Vec<String>>,
}


impl Config {
    /// Load configuration from first existing known location.
    /// Falls back to defaults when nothing usable is found.
    pub fn load() -> Config {
        let env_path = env::var(CONFIG_PATH_ENV).ok();
        let config_paths = [
            "/etc/hostmaster/hostmaster.conf",
            "/Services/Hostmaster/service.conf",
            "hostmaster.conf",
        ];
        let found = env_path
            .iter()
            .map(String::as_str)
            .chain(config_paths.iter().copied())
            .find(|file| Path::new(file).exists());

        match found {
            Some(path) => {
                Self::load_from(path).unwrap_or_else(|err| {
                    error!("Configuration error: {}. Using defaults.", err);
                    Config::default()
                })
            }
            None => {
                debug!("No configuration file found. Using defaults.");
                Config::default()
            }
        }
    }


    /// Load configuration from given file
    pub fn load_from(path: &str) -> Result<Config, ConfigError> {
        let contents = read_text_file(path)
            .map_err(|err| ConfigError::Unreadable(path.to_string(), err.to_string()))?;
        serde_json::from_str(&contents)
            .map_err(|err| ConfigError::Malformed(path.to_string(), err.to_string()))
    }


    /// Get LevelFilter (log level) from configuration
    pub fn get_log_level(&self) -> LevelFilter {
        let level = self
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_uppercase();
        match &level[..] {
            "OFF" => LevelFilter::OFF,
            "ERROR" => LevelFilter::ERROR,
            "WARN" => LevelFilter::WARN,
            "INFO" => LevelFilter::INFO,
            "DEBUG" => LevelFilter::DEBUG,
            "TRACE" => LevelFilter::TRACE,
            _ => LevelFilter::INFO,
        }
    }


    /// Base URL, without trailing slash
    pub fn base_url(&self) -> String {
        trim_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)).to_string()
    }


    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(CHECK_TIMEOUT))
    }


    /// Connection timeout
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout.unwrap_or(CHECK_CONNECTION_TIMEOUT))
    }


    /// Idle Curl handles cap
    pub fn max_idle_handles(&self) -> usize {
        self.max_idle_handles.unwrap_or(DEFAULT_MAX_IDLE_HANDLES)
    }


    /// User agent sent with each request
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!(
                "{name}/{version}",
                name = DEFAULT_USER_AGENT_NAME,
                version = env!("CARGO_PKG_VERSION")
            )
        })
    }


    /// Normalizer options derived from configuration
    pub fn normalizer_options(&self) -> NormalizerOptions {
        NormalizerOptions::ignoring(self.ignored_metric_keys.clone().unwrap_or_default())
    }
}
