pub mod commands;
pub mod audit;
pub mod serve;
pub mod progress;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use std::time::Duration;
use crate::config::{parse_config, ClientSettings, PagescopeConfig};
use crate::errors::PagescopeError;
use commands::ClientArgs;
use tracing::warn;

const API_KEY_VARS: [&str; 2] = ["PAGESCOPE_API_KEY", "PSI_API_KEY"];

/// Load the config file (if any) and layer flags and environment on top of it.
pub async fn load_settings(args: &ClientArgs) -> Result<(PagescopeConfig, ClientSettings), PagescopeError> {
    let config = match &args.config {
        Some(path) => parse_config(&PathBuf::from(path)).await?,
        None => PagescopeConfig::default(),
    };
    let env_key = API_KEY_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()));
    let settings = resolve_settings(args, &config, env_key)?;
    Ok((config, settings))
}

/// Precedence: flag, then config file, then environment, then defaults.
pub fn resolve_settings(
    args: &ClientArgs,
    config: &PagescopeConfig,
    env_key: Option<String>,
) -> Result<ClientSettings, PagescopeError> {
    let mut settings = ClientSettings::from_config(config);

    settings.api_key = args
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .or(settings.api_key)
        .or(env_key);
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(strategy) = &args.strategy {
        settings.strategy = strategy.parse()?;
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            return Err(PagescopeError::Config("--timeout must be greater than zero".into()));
        }
        settings.timeout = Duration::from_secs(secs);
    }
    if let Some(retries) = args.retries {
        settings.retry.max_retries = retries;
    }

    if settings.api_key.is_none() {
        warn!("No API key configured; requests use the scoring service's anonymous quota");
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, Strategy};

    fn config_with_key(key: &str) -> PagescopeConfig {
        PagescopeConfig {
            api: Some(ApiConfig { key: Some(key.into()), timeout_secs: Some(12), ..Default::default() }),
            ..Default::default()
        }
    }

    #[test]
    fn test_flag_beats_config_and_env() {
        let args = ClientArgs { api_key: Some("flag".into()), ..Default::default() };
        let settings = resolve_settings(&args, &config_with_key("file"), Some("env".into())).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("flag"));
    }

    #[test]
    fn test_config_beats_env() {
        let settings = resolve_settings(&ClientArgs::default(), &config_with_key("file"), Some("env".into())).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("file"));
        assert_eq!(settings.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_env_used_as_fallback() {
        let settings = resolve_settings(&ClientArgs::default(), &PagescopeConfig::default(), Some("env".into())).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("env"));
    }

    #[test]
    fn test_flag_overrides() {
        let args = ClientArgs {
            endpoint: Some("http://127.0.0.1:9/run".into()),
            strategy: Some("desktop".into()),
            timeout: Some(3),
            retries: Some(2),
            ..Default::default()
        };
        let settings = resolve_settings(&args, &PagescopeConfig::default(), None).unwrap();
        assert_eq!(settings.endpoint, "http://127.0.0.1:9/run");
        assert_eq!(settings.strategy, Strategy::Desktop);
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.retry.max_retries, 2);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = ClientArgs { timeout: Some(0), ..Default::default() };
        assert!(resolve_settings(&args, &PagescopeConfig::default(), None).is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let args = ClientArgs { strategy: Some("tablet".into()), ..Default::default() };
        assert!(matches!(
            resolve_settings(&args, &PagescopeConfig::default(), None),
            Err(PagescopeError::Config(_))
        ));
    }
}
