use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::errors::FailureKind;
use super::metric::Metric;
use super::problem::Problem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl AuditStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Why an item ended in `Error`. Rendering only distinguishes success from failure;
/// this is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Terminal result of one audit request, handed to the settlement callback.
#[derive(Debug, Clone)]
pub enum ItemOutcome {
    Success {
        score: u8,
        problems: Vec<Problem>,
        raw_response: Value,
    },
    Error(AuditFailure),
}

impl ItemOutcome {
    pub fn status(&self) -> AuditStatus {
        match self {
            Self::Success { .. } => AuditStatus::Success,
            Self::Error(_) => AuditStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditItem {
    pub target: String,
    pub metric: Metric,
    pub status: AuditStatus,
    pub score: Option<u8>,
    pub problems: Vec<Problem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AuditFailure>,
    #[serde(skip)]
    pub raw_response: Option<Value>,
}

impl AuditItem {
    pub fn loading(target: impl Into<String>, metric: Metric) -> Self {
        Self {
            target: target.into(),
            metric,
            status: AuditStatus::Loading,
            score: None,
            problems: Vec::new(),
            error: None,
            raw_response: None,
        }
    }

    /// Record the item's terminal outcome in place.
    pub fn settle(&mut self, outcome: ItemOutcome) {
        self.status = outcome.status();
        match outcome {
            ItemOutcome::Success { score, problems, raw_response } => {
                self.score = Some(score);
                self.problems = problems;
                self.raw_response = Some(raw_response);
                self.error = None;
            }
            ItemOutcome::Error(failure) => {
                self.score = None;
                self.problems.clear();
                self.raw_response = None;
                self.error = Some(failure);
            }
        }
    }
}
