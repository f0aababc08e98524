use serde::{Deserialize, Serialize};

/// A failing (non-perfect) audit derived from one raw scoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Audit score in `[0, 1)`.
    pub raw_score: f64,
    /// Metric label the problem was reported under.
    pub category: String,
    /// Human-readable impact, only for audits scored in metric-savings mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_millis: Option<u64>,
}
