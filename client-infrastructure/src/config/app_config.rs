use std::env;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use client_domain::{
    ClientConfig, EventType, UpdateMode, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECONDS,
    DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RECONNECT_DELAY_MS,
    DEFAULT_RECONNECT_MAX_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SOURCE,
};

use super::validation::{validate_base_url, validate_non_zero};

pub const CONFIG_PATH_ENV: &str = "EVENTHUB_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./eventhub.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub update_mode: String,
    pub poll_interval_ms: u64,
    pub notification_ttl_ms: u64,
    pub request_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub reconnect_delay_ms: u64,
    pub reconnect_max_delay_ms: u64,
    pub default_source: String,
    pub default_type: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            update_mode: UpdateMode::default().to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            reconnect_max_delay_ms: DEFAULT_RECONNECT_MAX_DELAY_MS,
            default_source: DEFAULT_SOURCE.to_string(),
            default_type: EventType::default().to_string(),
        }
    }
}

impl AppConfig {
    /// File named by `EVENTHUB_CONFIG`, then `EVENTHUB_*` overrides.
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::read_file(Path::new(&path)).await?;
        config.apply_env_overrides();
        config.finalize()
    }

    /// Parses a config file without normalizing it. A missing file
    /// yields the defaults.
    pub async fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.finalize()
    }

    pub fn finalize(mut self) -> Result<Self> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    pub fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = DEFAULT_API_BASE_URL.to_string();
        }
        self.update_mode = self.update_mode.trim().to_lowercase();
        self.default_source = self.default_source.trim().to_string();
        if self.default_source.is_empty() {
            self.default_source = DEFAULT_SOURCE.to_string();
        }
        self.default_type = self.default_type.trim().to_string();
        if self.reconnect_max_delay_ms < self.reconnect_delay_ms {
            self.reconnect_max_delay_ms = self.reconnect_delay_ms;
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.api_base_url)?;
        self.update_mode
            .parse::<UpdateMode>()
            .map_err(|err| anyhow!("invalid update_mode: {}", err))?;
        self.default_type
            .parse::<EventType>()
            .map_err(|err| anyhow!("invalid default_type: {}", err))?;
        validate_non_zero("poll_interval_ms", self.poll_interval_ms)?;
        validate_non_zero("notification_ttl_ms", self.notification_ttl_ms)?;
        validate_non_zero("request_timeout_seconds", self.request_timeout_seconds)?;
        validate_non_zero("connect_timeout_seconds", self.connect_timeout_seconds)?;
        validate_non_zero("reconnect_delay_ms", self.reconnect_delay_ms)?;
        Ok(())
    }

    /// Only meaningful after `validate`.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            update_mode: self.update_mode.parse().unwrap_or_default(),
            poll_interval_ms: self.poll_interval_ms,
            notification_ttl_ms: self.notification_ttl_ms,
            request_timeout_seconds: self.request_timeout_seconds,
            connect_timeout_seconds: self.connect_timeout_seconds,
            reconnect_delay_ms: self.reconnect_delay_ms,
            reconnect_max_delay_ms: self.reconnect_max_delay_ms,
            default_source: self.default_source.clone(),
            default_type: self.default_type.parse().unwrap_or_default(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("EVENTHUB_API_URL") {
            self.api_base_url = value;
        }
        if let Ok(value) = env::var("EVENTHUB_UPDATE_MODE") {
            self.update_mode = value;
        }
        if let Ok(value) = env::var("EVENTHUB_POLL_INTERVAL_MS") {
            self.poll_interval_ms = value.parse().unwrap_or(self.poll_interval_ms);
        }
        if let Ok(value) = env::var("EVENTHUB_NOTIFICATION_TTL_MS") {
            self.notification_ttl_ms = value.parse().unwrap_or(self.notification_ttl_ms);
        }
        if let Ok(value) = env::var("EVENTHUB_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("EVENTHUB_CONNECT_TIMEOUT_SECONDS") {
            self.connect_timeout_seconds = value.parse().unwrap_or(self.connect_timeout_seconds);
        }
        if let Ok(value) = env::var("EVENTHUB_RECONNECT_DELAY_MS") {
            self.reconnect_delay_ms = value.parse().unwrap_or(self.reconnect_delay_ms);
        }
        if let Ok(value) = env::var("EVENTHUB_RECONNECT_MAX_DELAY_MS") {
            self.reconnect_max_delay_ms = value.parse().unwrap_or(self.reconnect_max_delay_ms);
        }
        if let Ok(value) = env::var("EVENTHUB_DEFAULT_SOURCE") {
            self.default_source = value;
        }
        if let Ok(value) = env::var("EVENTHUB_DEFAULT_TYPE") {
            self.default_type = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").expect("config");
        assert_eq!(config.to_client_config(), ClientConfig::default());
    }

    #[test]
    fn file_values_are_normalized() {
        let config = AppConfig::from_toml_str(
            r#"
            api_base_url = " http://events.internal:9090/ "
            update_mode = "POLL"
            poll_interval_ms = 1500
            reconnect_delay_ms = 5000
            reconnect_max_delay_ms = 1000
            default_source = "  "
            default_type = "data-update"
            "#,
        )
        .expect("config");

        let client = config.to_client_config();
        assert_eq!(client.api_base_url, "http://events.internal:9090");
        assert_eq!(client.update_mode, UpdateMode::Poll);
        assert_eq!(client.poll_interval_ms, 1500);
        assert_eq!(client.reconnect_max_delay_ms, 5000);
        assert_eq!(client.default_source, DEFAULT_SOURCE);
        assert_eq!(client.default_type, EventType::DataUpdate);
        assert_eq!(client.endpoint("/api/events"), "http://events.internal:9090/api/events");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_toml_str(r#"api_base_url = "localhost:8080""#).is_err());
        assert!(AppConfig::from_toml_str(r#"update_mode = "websocket""#).is_err());
        assert!(AppConfig::from_toml_str("poll_interval_ms = 0").is_err());
        assert!(AppConfig::from_toml_str(r#"default_type = "BOGUS""#).is_err());
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "update_mode = \"sse\"").expect("write");
        writeln!(file, "notification_ttl_ms = 4500").expect("write");

        let config = AppConfig::read_file(file.path())
            .await
            .expect("read")
            .finalize()
            .expect("valid");

        assert_eq!(config.to_client_config().update_mode, UpdateMode::Push);
        assert_eq!(config.notification_ttl_ms, 4500);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig::read_file(&dir.path().join("absent.toml"))
            .await
            .expect("defaults");
        assert_eq!(config, AppConfig::default());
    }
}
