use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::errors::RetryConfig;
use crate::models::Metric;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PagescopeConfig {
    pub api: Option<ApiConfig>,
    pub audit: Option<AuditConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Clone, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub endpoint: Option<String>,
    pub strategy: Option<Strategy>,
    pub locale: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("strategy", &self.strategy)
            .field("locale", &self.locale)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Device profile the page is analyzed under.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = crate::errors::PagescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(crate::errors::PagescopeError::Config(format!(
                "Unknown strategy '{}': expected mobile or desktop",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AuditConfig {
    pub metric: Option<Metric>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub report: Option<String>,
}

/// Fully resolved settings for talking to the scoring service.
///
/// Built once at the edge and passed into the client; nothing below reads the environment.
#[derive(Clone)]
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub strategy: Strategy,
    pub locale: Option<String>,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            strategy: Strategy::default(),
            locale: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("strategy", &self.strategy)
            .field("locale", &self.locale)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ClientSettings {
    /// Start from defaults and apply whatever the config file's `api` section sets.
    pub fn from_config(config: &PagescopeConfig) -> Self {
        let mut settings = Self::default();
        if let Some(api) = &config.api {
            if let Some(key) = api.key.as_ref().filter(|k| !k.trim().is_empty()) {
                settings.api_key = Some(key.clone());
            }
            if let Some(endpoint) = &api.endpoint {
                settings.endpoint = endpoint.clone();
            }
            if let Some(strategy) = api.strategy {
                settings.strategy = strategy;
            }
            settings.locale = api.locale.clone();
            if let Some(secs) = api.timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
            if let Some(retries) = api.max_retries {
                settings.retry.max_retries = retries;
            }
        }
        settings
    }
}
