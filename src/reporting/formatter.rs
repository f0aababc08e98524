use crate::models::{AuditStatus, Problem};
use super::export::Report;

pub fn format_problem_markdown(problem: &Problem) -> String {
    let mut out = format!(
        "- **{}** (`{}`, score {:.2})",
        problem.title, problem.id, problem.raw_score
    );
    if let Some(impact) = &problem.impact_summary {
        out.push_str(&format!(": {}", impact));
    }
    let mut savings = Vec::new();
    if let Some(ms) = problem.savings_millis {
        savings.push(format!("{} ms", ms));
    }
    if let Some(bytes) = problem.savings_bytes {
        savings.push(format!("{} KiB", bytes / 1024));
    }
    if !savings.is_empty() {
        out.push_str(&format!(" [saves {}]", savings.join(", ")));
    }
    out.push('\n');
    out
}

pub fn format_summary_markdown(report: &Report, include_problems: bool) -> String {
    let mut out = format!(
        "## {} audit\n\n| URL | Status | Score | Problems |\n|---|---|---|---|\n",
        report.metric.label()
    );
    for entry in &report.results {
        let status = match entry.status {
            AuditStatus::Success => "ok",
            AuditStatus::Error => "processing error",
            AuditStatus::Loading => "pending",
            AuditStatus::Idle => "idle",
        };
        let score = entry.score.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
        out.push_str(&format!("| {} | {} | {} | {} |\n", entry.url, status, score, entry.problems.len()));
    }

    out.push_str(&format!(
        "\n**Succeeded:** {} / {}",
        report.succeeded(),
        report.results.len()
    ));
    if let Some(avg) = report.average_score() {
        out.push_str(&format!(" | **Average score:** {:.0}", avg));
    }
    out.push('\n');

    if include_problems {
        for entry in report.results.iter().filter(|e| !e.problems.is_empty()) {
            out.push_str(&format!("\n### {}\n\n", entry.url));
            for problem in &entry.problems {
                out.push_str(&format_problem_markdown(problem));
            }
        }
    }
    out
}
