use async_trait::async_trait;
use serde_json::Value;
use crate::errors::PagescopeError;
use crate::models::Metric;

#[async_trait]
pub trait AuditClient: Send + Sync {
    /// Run one audit of `url` scored for `metric` and return the raw response body.
    async fn fetch(&self, url: &str, metric: Metric) -> Result<Value, PagescopeError>;

    /// Client name for logging
    fn client_name(&self) -> &str;
}
