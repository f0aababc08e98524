use std::path::Path;
use crate::errors::PagescopeError;
use super::types::PagescopeConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<PagescopeConfig, PagescopeError> {
    if !path.exists() {
        return Err(PagescopeError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(PagescopeError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<PagescopeConfig, PagescopeError> {
    // An empty file is a valid, empty config
    if content.trim().is_empty() {
        return Ok(PagescopeConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_schema(&yaml)?;

    let config: PagescopeConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), PagescopeError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| PagescopeError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| PagescopeError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed parsing below is authoritative
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &PagescopeConfig) -> Result<(), PagescopeError> {
    if let Some(api) = &config.api {
        if api.timeout_secs == Some(0) {
            return Err(PagescopeError::Config("api.timeout_secs must be greater than zero".into()));
        }
        if let Some(endpoint) = &api.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(PagescopeError::Config(format!(
                    "api.endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }
    }

    Ok(())
}
