use std::sync::Arc;
use std::time::Duration;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use crate::config::ClientSettings;
use crate::errors::{with_retry, FailureKind, PagescopeError, RetryConfig};
use crate::models::{AuditFailure, ItemOutcome, Metric};
use crate::psi::{category_score, extract_problems, AuditClient};
use tracing::{debug, info, warn};

/// Issues one independent audit per target and reports each settlement as it happens.
///
/// The runner keeps no state between batches; everything a batch needs is moved
/// into the task spawned by [`BatchAuditRunner::run`].
#[derive(Clone)]
pub struct BatchAuditRunner {
    client: Arc<dyn AuditClient>,
    timeout: Duration,
    retry: RetryConfig,
}

impl BatchAuditRunner {
    pub fn new(client: Arc<dyn AuditClient>) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }

    pub fn from_settings(client: Arc<dyn AuditClient>, settings: &ClientSettings) -> Self {
        Self::new(client)
            .with_timeout(settings.timeout)
            .with_retry(settings.retry.clone())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Start auditing `targets` and return immediately.
    ///
    /// `on_item_settled` is called exactly once per target with the target's index in
    /// `targets`, in completion order rather than submission order. Calls are made
    /// one at a time from a single task. Targets must already be trimmed and non-empty.
    pub fn run<F>(&self, targets: Vec<String>, metric: Metric, mut on_item_settled: F) -> JoinHandle<()>
    where
        F: FnMut(usize, ItemOutcome) + Send + 'static,
    {
        let client = self.client.clone();
        let timeout = self.timeout;
        let retry = self.retry.clone();

        tokio::spawn(async move {
            let total = targets.len();
            debug!(total, metric = %metric, client = client.client_name(), "Dispatching audits");

            let mut pending: FuturesUnordered<_> = targets
                .into_iter()
                .enumerate()
                .map(|(index, url)| {
                    let client = client.clone();
                    let retry = retry.clone();
                    // One task per item so a panicking client only fails its own item
                    let handle = tokio::spawn(async move {
                        audit_target(client.as_ref(), &url, metric, timeout, &retry).await
                    });
                    async move { (index, handle.await) }
                })
                .collect();

            while let Some((index, joined)) = pending.next().await {
                let outcome = joined.unwrap_or_else(|e| {
                    warn!(index, error = %e, "Audit task aborted");
                    ItemOutcome::Error(AuditFailure {
                        kind: FailureKind::Internal,
                        message: format!("Audit task aborted: {}", e),
                    })
                });
                on_item_settled(index, outcome);
            }
        })
    }
}

/// Audit a single target and classify the result. Never fails: errors become
/// [`ItemOutcome::Error`].
pub async fn audit_target(
    client: &dyn AuditClient,
    url: &str,
    metric: Metric,
    timeout: Duration,
    retry: &RetryConfig,
) -> ItemOutcome {
    let result = with_retry("audit", retry, move || async move {
        match tokio::time::timeout(timeout, client.fetch(url, metric)).await {
            Ok(response) => response,
            Err(_) => Err(PagescopeError::Timeout(format!(
                "No response for {} within {:?}",
                url, timeout
            ))),
        }
    })
    .await
    .and_then(|raw| {
        let score = category_score(&raw, metric)?;
        let problems = extract_problems(&raw, metric.as_str());
        Ok(ItemOutcome::Success { score, problems, raw_response: raw })
    });

    match result {
        Ok(outcome) => {
            if let ItemOutcome::Success { score, problems, .. } = &outcome {
                info!(url, metric = %metric, score, problems = problems.len(), "Audit succeeded");
            }
            outcome
        }
        Err(e) => {
            let kind = e.failure_kind();
            warn!(url, metric = %metric, error_type = e.classify().error_type, error = %e, "Audit failed");
            ItemOutcome::Error(AuditFailure { kind, message: e.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct FixedClient(Result<Value, &'static str>);

    #[async_trait]
    impl AuditClient for FixedClient {
        async fn fetch(&self, _url: &str, _metric: Metric) -> Result<Value, PagescopeError> {
            self.0.clone().map_err(|m| PagescopeError::Network(m.into()))
        }
        fn client_name(&self) -> &str { "fixed" }
    }

    struct HangingClient;

    #[async_trait]
    impl AuditClient for HangingClient {
        async fn fetch(&self, _url: &str, _metric: Metric) -> Result<Value, PagescopeError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(json!({}))
        }
        fn client_name(&self) -> &str { "hanging" }
    }

    struct PanickingClient;

    #[async_trait]
    impl AuditClient for PanickingClient {
        async fn fetch(&self, url: &str, _metric: Metric) -> Result<Value, PagescopeError> {
            if url.contains("boom") {
                panic!("client bug");
            }
            Ok(json!({"lighthouseResult": {"categories": {"performance": {"score": 0.5}}}}))
        }
        fn client_name(&self) -> &str { "panicking" }
    }

    #[tokio::test]
    async fn test_audit_target_success() {
        let client = FixedClient(Ok(json!({
            "lighthouseResult": {
                "categories": {"performance": {"score": 0.85}},
                "audits": {"a": {"title": "A", "score": 0.2}, "b": {"title": "B", "score": 1}}
            }
        })));
        let outcome = audit_target(&client, "https://a.example", Metric::Performance, Duration::from_secs(1), &RetryConfig::default()).await;
        match outcome {
            ItemOutcome::Success { score, problems, .. } => {
                assert_eq!(score, 85);
                assert_eq!(problems.len(), 1);
                assert_eq!(problems[0].category, "performance");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_audit_target_network_failure() {
        let client = FixedClient(Err("connection refused"));
        let outcome = audit_target(&client, "https://a.example", Metric::Seo, Duration::from_secs(1), &RetryConfig::default()).await;
        match outcome {
            ItemOutcome::Error(failure) => assert_eq!(failure.kind, FailureKind::Network),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_audit_target_timeout_is_bounded() {
        let started = std::time::Instant::now();
        let outcome = audit_target(&HangingClient, "https://slow.example", Metric::Performance, Duration::from_millis(50), &RetryConfig::default()).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        match outcome {
            ItemOutcome::Error(failure) => assert_eq!(failure.kind, FailureKind::Timeout),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_audit_target_malformed_score() {
        let client = FixedClient(Ok(json!({"lighthouseResult": {"categories": {"seo": {"score": "n/a"}}}})));
        let outcome = audit_target(&client, "https://a.example", Metric::Seo, Duration::from_secs(1), &RetryConfig::default()).await;
        match outcome {
            ItemOutcome::Error(failure) => assert_eq!(failure.kind, FailureKind::MalformedResponse),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_empty_targets_never_calls_back() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        let runner = BatchAuditRunner::new(Arc::new(FixedClient(Ok(json!({})))));
        runner.run(vec![], Metric::Performance, move |_, _| {
            *counter.lock().unwrap() += 1;
        }).await.unwrap();
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_panic_is_isolated_to_its_item() {
        let settled = Arc::new(Mutex::new(Vec::new()));
        let sink = settled.clone();
        let runner = BatchAuditRunner::new(Arc::new(PanickingClient));
        runner.run(
            vec!["https://ok.example".into(), "https://boom.example".into()],
            Metric::Performance,
            move |index, outcome| sink.lock().unwrap().push((index, outcome.status())),
        ).await.unwrap();

        let mut settled = settled.lock().unwrap().clone();
        settled.sort_by_key(|(i, _)| *i);
        assert_eq!(settled, vec![
            (0, crate::models::AuditStatus::Success),
            (1, crate::models::AuditStatus::Error),
        ]);
    }
}
