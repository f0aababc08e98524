use std::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::PagescopeError;
use crate::models::{AuditFailure, AuditItem, AuditStatus, Metric, Problem};
use tracing::info;

/// Downloadable snapshot of a batch: one entry per target, in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub metric: Metric,
    pub results: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub url: String,
    pub status: AuditStatus,
    /// Null unless the audit succeeded.
    pub score: Option<u8>,
    pub problems: Vec<Problem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AuditFailure>,
}

impl From<&AuditItem> for ReportEntry {
    fn from(item: &AuditItem) -> Self {
        Self {
            url: item.target.clone(),
            status: item.status,
            score: item.score,
            problems: item.problems.clone(),
            error: item.error.clone(),
        }
    }
}

impl Report {
    pub fn from_items(metric: Metric, items: &[AuditItem]) -> Self {
        Self {
            timestamp: Utc::now(),
            metric,
            results: items.iter().map(ReportEntry::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, PagescopeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self, PagescopeError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.status == AuditStatus::Success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.status == AuditStatus::Error).count()
    }

    /// Mean score across successful entries.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self.results.iter().filter_map(|r| r.score).map(f64::from).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }

    pub fn suggested_filename(&self) -> String {
        format!("pagescope-{}-{}.json", self.metric, self.timestamp.format("%Y%m%dT%H%M%SZ"))
    }

    pub async fn write_to(&self, path: &Path) -> Result<(), PagescopeError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.to_json()?).await?;
        info!(path = %path.display(), results = self.results.len(), "Wrote report");
        Ok(())
    }
}
