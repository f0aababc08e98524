use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tokio::sync::mpsc;
use crate::models::{AuditStatus, Metric};
use crate::reporting::Report;
use crate::targets::parse_targets;
use super::events::BatchEvent;
use super::runner::BatchAuditRunner;
use super::state::{ApplyResult, BatchSnapshot, BatchState};
use tracing::{debug, info, warn};

/// Owns the current batch and feeds runner settlements into it.
///
/// Every submission bumps the generation. Settlements are tagged with the generation
/// they were started under, so results from a superseded batch are dropped instead of
/// landing in the new one.
pub struct Dashboard {
    runner: BatchAuditRunner,
    state: Arc<RwLock<BatchState>>,
    event_tx: Option<mpsc::UnboundedSender<BatchEvent>>,
}

impl Dashboard {
    pub fn new(runner: BatchAuditRunner) -> Self {
        Self {
            runner,
            state: Arc::new(RwLock::new(BatchState::new())),
            event_tx: None,
        }
    }

    /// Attach an event channel for streaming batch progress to a renderer.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<BatchEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Submit free-text input (one target per line) as a new batch.
    pub fn submit_text(&self, input: &str, metric: Metric) -> u64 {
        self.submit(parse_targets(input), metric)
    }

    /// Replace the current batch with `targets` and start auditing them.
    ///
    /// Every item is observable as `Loading` before this returns. Returns the new
    /// batch's generation.
    pub fn submit(&self, targets: Vec<String>, metric: Metric) -> u64 {
        let generation = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .begin(&targets, metric);

        info!(generation, total = targets.len(), metric = %metric, "Batch started");
        emit(&self.event_tx, BatchEvent::BatchStarted {
            generation,
            metric,
            targets: targets.clone(),
        });

        if targets.is_empty() {
            emit(&self.event_tx, BatchEvent::BatchCompleted {
                generation,
                total: 0,
                succeeded: 0,
                failed: 0,
                duration_ms: 0,
            });
            return generation;
        }

        let state = self.state.clone();
        let event_tx = self.event_tx.clone();
        let started = Instant::now();

        self.runner.run(targets, metric, move |index, outcome| {
            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
            match state.apply(generation, index, outcome) {
                ApplyResult::Applied => {
                    if let Some(item) = state.item(index) {
                        emit(&event_tx, BatchEvent::ItemSettled {
                            generation,
                            index,
                            target: item.target.clone(),
                            status: item.status,
                            score: item.score,
                            problems: item.problems.len(),
                        });
                    }
                    if state.is_done() {
                        let succeeded = state.count_status(AuditStatus::Success);
                        let failed = state.count_status(AuditStatus::Error);
                        let duration_ms = started.elapsed().as_millis() as u64;
                        info!(generation, succeeded, failed, duration_ms, "Batch completed");
                        emit(&event_tx, BatchEvent::BatchCompleted {
                            generation,
                            total: state.items().len(),
                            succeeded,
                            failed,
                            duration_ms,
                        });
                    }
                }
                ApplyResult::Stale { current_generation } => {
                    debug!(generation, current_generation, index, "Dropping result from superseded batch");
                    emit(&event_tx, BatchEvent::StaleResultDropped {
                        generation,
                        current_generation,
                        index,
                    });
                }
                other => {
                    warn!(generation, index, result = ?other, "Settlement had no effect");
                }
            }
        });

        generation
    }

    pub fn generation(&self) -> u64 {
        self.read(|s| s.generation())
    }

    pub fn is_done(&self) -> bool {
        self.read(|s| s.is_done())
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        self.read(|s| s.snapshot())
    }

    /// Export the current batch as it stands right now.
    pub fn report(&self) -> Report {
        self.read(|s| Report::from_items(s.metric(), s.items()))
    }

    fn read<T>(&self, f: impl FnOnce(&BatchState) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }
}

fn emit(tx: &Option<mpsc::UnboundedSender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}
