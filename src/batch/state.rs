use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::models::{AuditItem, AuditStatus, ItemOutcome, Metric};

/// Result of applying one settlement to the batch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// The settlement belongs to a batch that has since been replaced.
    Stale { current_generation: u64 },
    OutOfRange,
    AlreadySettled,
}

/// The current batch: its generation, items in submission order, and a settled count.
///
/// Item count and order are fixed by [`BatchState::begin`]; afterwards only per-item
/// fields change, one slot at a time, through [`BatchState::apply`].
#[derive(Debug, Default)]
pub struct BatchState {
    generation: u64,
    metric: Metric,
    items: Vec<AuditItem>,
    settled: usize,
    started_at: Option<DateTime<Utc>>,
}

/// Point-in-time copy of the batch for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSnapshot {
    pub generation: u64,
    pub metric: Metric,
    pub total: usize,
    pub settled: usize,
    pub done: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub items: Vec<AuditItem>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a new batch in `Loading` state and return its generation.
    pub fn begin(&mut self, targets: &[String], metric: Metric) -> u64 {
        self.generation += 1;
        self.metric = metric;
        self.items = targets
            .iter()
            .map(|t| AuditItem::loading(t.clone(), metric))
            .collect();
        self.settled = 0;
        self.started_at = Some(Utc::now());
        self.generation
    }

    pub fn apply(&mut self, generation: u64, index: usize, outcome: ItemOutcome) -> ApplyResult {
        if generation != self.generation {
            return ApplyResult::Stale { current_generation: self.generation };
        }
        let Some(item) = self.items.get_mut(index) else {
            return ApplyResult::OutOfRange;
        };
        if item.status.is_settled() {
            return ApplyResult::AlreadySettled;
        }
        item.settle(outcome);
        self.settled += 1;
        ApplyResult::Applied
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn items(&self) -> &[AuditItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&AuditItem> {
        self.items.get(index)
    }

    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn is_done(&self) -> bool {
        self.settled == self.items.len()
    }

    pub fn count_status(&self, status: AuditStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        BatchSnapshot {
            generation: self.generation,
            metric: self.metric,
            total: self.items.len(),
            settled: self.settled,
            done: self.is_done(),
            started_at: self.started_at,
            items: self.items.clone(),
        }
    }
}
