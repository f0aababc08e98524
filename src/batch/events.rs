use crate::models::{AuditStatus, Metric};

/// Messages published by the dashboard as a batch progresses.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// A submission replaced the current batch
    BatchStarted {
        generation: u64,
        metric: Metric,
        targets: Vec<String>,
    },
    /// One item reached its terminal state
    ItemSettled {
        generation: u64,
        index: usize,
        target: String,
        status: AuditStatus,
        score: Option<u8>,
        problems: usize,
    },
    /// Every item of the batch has settled
    BatchCompleted {
        generation: u64,
        total: usize,
        succeeded: usize,
        failed: usize,
        duration_ms: u64,
    },
    /// A result from a superseded batch arrived and was discarded
    StaleResultDropped {
        generation: u64,
        current_generation: u64,
        index: usize,
    },
}
