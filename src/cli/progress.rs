use std::collections::HashMap;
use std::time::Duration;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use console::style;
use crate::batch::BatchEvent;
use crate::models::AuditStatus;

/// Renders one spinner per target plus an overall bar while a batch runs.
pub struct AuditProgress {
    multi: MultiProgress,
    overall: Option<ProgressBar>,
    item_bars: HashMap<usize, ProgressBar>,
}

impl AuditProgress {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            overall: None,
            item_bars: HashMap::new(),
        }
    }

    /// Handle a batch event and update progress bars accordingly.
    pub fn handle_event(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::BatchStarted { metric, targets, .. } => {
                let overall = self.multi.add(ProgressBar::new(targets.len() as u64));
                overall.set_style(
                    ProgressStyle::default_bar()
                        .template("  {bar:30.cyan/dark_gray} {pos}/{len} audited | {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓░"),
                );
                overall.set_message(metric.label().to_string());

                for (index, target) in targets.iter().enumerate() {
                    let bar = self.multi.insert_before(&overall, ProgressBar::new_spinner());
                    bar.set_style(
                        ProgressStyle::default_spinner()
                            .template("    {spinner:.yellow} {msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                    );
                    bar.set_message(format!("{} analyzing...", target));
                    bar.enable_steady_tick(Duration::from_millis(100));
                    self.item_bars.insert(index, bar);
                }
                self.overall = Some(overall);
            }
            BatchEvent::ItemSettled { index, target, status, score, problems, .. } => {
                if let Some(bar) = self.item_bars.remove(index) {
                    let line = match (status, score) {
                        (AuditStatus::Success, Some(score)) => format!(
                            "{} {} {} ({} problems)",
                            style("✔").green(),
                            score_style(*score),
                            target,
                            problems
                        ),
                        _ => format!("{} {} processing error", style("✘").red(), target),
                    };
                    bar.set_style(ProgressStyle::default_spinner()
                        .template("    {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()));
                    bar.finish_with_message(line);
                }
                if let Some(overall) = &self.overall {
                    overall.inc(1);
                }
            }
            BatchEvent::BatchCompleted { succeeded, failed, duration_ms, .. } => {
                for (_, bar) in self.item_bars.drain() {
                    bar.finish_and_clear();
                }
                if let Some(overall) = self.overall.take() {
                    overall.finish_with_message(format!(
                        "{} ok, {} failed in {}",
                        succeeded,
                        failed,
                        format_elapsed(*duration_ms)
                    ));
                }
            }
            BatchEvent::StaleResultDropped { .. } => {}
        }
    }
}

impl Default for AuditProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn score_style(score: u8) -> console::StyledObject<String> {
    let text = format!("{:>3}", score);
    match score {
        90..=100 => style(text).green().bold(),
        50..=89 => style(text).yellow().bold(),
        _ => style(text).red().bold(),
    }
}

pub(crate) fn format_elapsed(ms: u64) -> String {
    let secs = ms / 1000;
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    if mins > 0 {
        format!("{}m{}s", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", ms)
    }
}
