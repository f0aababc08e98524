use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use crate::config::ClientSettings;
use crate::errors::PagescopeError;
use crate::models::Metric;
use super::client::AuditClient;
use tracing::debug;

/// Client for the PageSpeed Insights `runPagespeed` endpoint.
pub struct PageSpeedClient {
    client: Client,
    settings: ClientSettings,
}

impl PageSpeedClient {
    pub fn new(settings: ClientSettings) -> Result<Self, PagescopeError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("pagescope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PagescopeError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }

    fn query(&self, url: &str, metric: Metric) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("url", url.to_string()),
            ("category", metric.api_category().to_string()),
            ("strategy", self.settings.strategy.as_str().to_string()),
        ];
        if let Some(locale) = &self.settings.locale {
            query.push(("locale", locale.clone()));
        }
        if let Some(key) = &self.settings.api_key {
            query.push(("key", key.clone()));
        }
        query
    }
}

#[async_trait]
impl AuditClient for PageSpeedClient {
    async fn fetch(&self, url: &str, metric: Metric) -> Result<Value, PagescopeError> {
        debug!(url, metric = %metric, "Requesting audit");

        let resp = self.client
            .get(&self.settings.endpoint)
            .query(&self.query(url, metric))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PagescopeError::Timeout(format!("Audit request for {} timed out", url))
                } else {
                    // Without the URL: reqwest errors echo the query string, key included
                    PagescopeError::Network(format!("Audit request failed: {}", e.without_url()))
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                PagescopeError::Timeout(format!("Reading audit response for {} timed out", url))
            } else {
                PagescopeError::Network(format!("Failed to read audit response: {}", e.without_url()))
            }
        })?;
        let data: Option<Value> = serde_json::from_str(&body).ok();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PagescopeError::RateLimit(api_message(data.as_ref(), "Scoring API rate limit")));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PagescopeError::Authentication(api_message(data.as_ref(), "API key rejected")));
        }
        if !status.is_success() {
            return Err(PagescopeError::api(
                Some(status.as_u16()),
                format!("HTTP {}: {}", status.as_u16(), api_message(data.as_ref(), "request failed")),
            ));
        }

        let data = data.ok_or_else(|| {
            PagescopeError::MalformedResponse(format!("Response for {} is not JSON", url))
        })?;

        if data.get("error").is_some_and(|e| !e.is_null()) {
            let code = data["error"]["code"].as_u64().and_then(|c| u16::try_from(c).ok());
            return Err(PagescopeError::api(code, api_message(Some(&data), "Unknown API error")));
        }

        Ok(data)
    }

    fn client_name(&self) -> &str { "pagespeed" }
}

fn api_message(data: Option<&Value>, fallback: &str) -> String {
    data.and_then(|d| d["error"]["message"].as_str())
        .unwrap_or(fallback)
        .to_string()
}
