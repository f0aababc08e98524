pub mod export;
pub mod formatter;

pub use export::{Report, ReportEntry};
pub use formatter::{format_problem_markdown, format_summary_markdown};
