use crate::model::ConfigError;
use crate::scraper::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};
use crate::scraper::{DEFAULT_USER_AGENT, Fetcher, RetryPolicy};
use crate::utils::ALL_SITES_URL;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub user_agent: String,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub timeout_secs: Option<u64>,
    pub url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY.as_millis() as u64,
            timeout_secs: None,
            url: ALL_SITES_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Fetcher configured from this file.
    pub fn fetcher(&self) -> Fetcher {
        Fetcher::new()
            .policy(self.retry_policy())
            .user_agent(self.user_agent.clone())
            .default_timeout(self.timeout())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::Invalid("max_retries must be at least 1".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid("url must not be empty".into()));
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()
}

/// Loads the JSON config at `path`. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => {
            info!("Loaded config from {}", path.display());
            parse_config(&content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.retry_policy(), RetryPolicy::default());
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = parse_config(
            r#"{"user_agent": "ListingBot/1.0", "max_retries": 5, "base_delay_ms": 100, "timeout_secs": 20}"#,
        )
        .unwrap();
        assert_eq!(cfg.user_agent, "ListingBot/1.0");
        assert_eq!(cfg.retry_policy().max_retries, 5);
        assert_eq!(cfg.retry_policy().backoff(2), Duration::from_millis(200));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(cfg.url, ALL_SITES_URL);
    }

    #[test]
    fn zero_retries_rejected() {
        assert!(matches!(
            parse_config(r#"{"max_retries": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(parse_config("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config("definitely/not/here/config.json").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
