use serde::{Deserialize, Serialize};
use crate::targets::{collect_targets, parse_targets};

/// Targets as typed into the dashboard (one per line) or as a ready-made list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UrlsInput {
    Text(String),
    List(Vec<String>),
}

impl UrlsInput {
    pub fn into_targets(self) -> Vec<String> {
        match self {
            Self::Text(text) => parse_targets(&text),
            Self::List(list) => collect_targets(list),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitBatchRequest {
    pub urls: UrlsInput,
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitBatchResponse {
    pub generation: u64,
    pub total: usize,
    pub metric: String,
}

#[derive(Debug, Serialize)]
pub struct MetricOption {
    pub value: &'static str,
    pub label: &'static str,
}
