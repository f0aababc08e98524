#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use pagescope::batch::Dashboard;
use pagescope::errors::PagescopeError;
use pagescope::models::Metric;
use pagescope::psi::AuditClient;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

/// What the fake scoring service does for one URL.
#[derive(Clone)]
pub enum Script {
    Respond(Value),
    Fail(&'static str),
    /// Answer with an HTTP error status.
    Reject(u16, &'static str),
    /// Hold the response until the gate has a permit to hand out.
    Gated(Arc<Semaphore>, Value),
}

#[derive(Default)]
pub struct ScriptedClient {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, url: &str, script: Script) -> Self {
        self.scripts.lock().unwrap().insert(url.to_string(), script);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditClient for ScriptedClient {
    async fn fetch(&self, url: &str, _metric: Metric) -> Result<Value, PagescopeError> {
        self.calls.lock().unwrap().push(url.to_string());
        let script = self.scripts.lock().unwrap().get(url).cloned();
        match script {
            Some(Script::Respond(value)) => Ok(value),
            Some(Script::Fail(message)) => Err(PagescopeError::Network(message.into())),
            Some(Script::Reject(status, message)) => Err(PagescopeError::api(Some(status), message)),
            Some(Script::Gated(gate, value)) => {
                let _permit = gate
                    .acquire()
                    .await
                    .map_err(|e| PagescopeError::Internal(e.to_string()))?;
                Ok(value)
            }
            None => Err(PagescopeError::api(Some(404), format!("no script for {}", url))),
        }
    }

    fn client_name(&self) -> &str { "scripted" }
}

/// A minimal scoring response with one category score and optional audits.
pub fn psi_response(metric: &str, score: Value) -> Value {
    json!({
        "lighthouseResult": {
            "categories": { metric: { "score": score } },
            "audits": {
                "first-contentful-paint": {
                    "id": "first-contentful-paint",
                    "title": "First Contentful Paint",
                    "description": "First Contentful Paint marks the time at which the first text or image is painted.",
                    "score": 0.62,
                    "scoreDisplayMode": "numeric",
                    "displayValue": "2.4 s"
                },
                "viewport": {
                    "id": "viewport",
                    "title": "Has a viewport meta tag",
                    "description": "",
                    "score": 1
                },
                "render-blocking-resources": {
                    "id": "render-blocking-resources",
                    "title": "Eliminate render-blocking resources",
                    "description": "Resources are blocking the first paint of your page.",
                    "score": 0.4,
                    "scoreDisplayMode": "metricSavings",
                    "displayValue": "Potential savings of 750 ms",
                    "metricSavings": { "FCP": 750 },
                    "details": { "overallSavingsMs": 750 }
                }
            }
        }
    })
}

pub fn closed_gate() -> Arc<Semaphore> {
    Arc::new(Semaphore::new(0))
}

pub async fn wait_until_done(dashboard: &Dashboard) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !dashboard.is_done() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("batch did not finish in time");
}
