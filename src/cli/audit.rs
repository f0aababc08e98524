use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use crate::batch::{BatchAuditRunner, BatchEvent, Dashboard};
use crate::cli::commands::AuditArgs;
use crate::cli::load_settings;
use crate::cli::progress::AuditProgress;
use crate::errors::PagescopeError;
use crate::models::Metric;
use crate::psi::PageSpeedClient;
use crate::reporting::format_summary_markdown;
use crate::targets::{collect_targets, parse_targets};
use tracing::{info, warn};

pub async fn handle_audit(args: AuditArgs, quiet: bool) -> Result<(), PagescopeError> {
    let (config, settings) = load_settings(&args.client).await?;

    let metric = match args.metric.as_deref() {
        Some(m) => m.parse::<Metric>()?,
        None => config.audit.as_ref().and_then(|a| a.metric).unwrap_or_default(),
    };

    let targets = gather_targets(&args).await?;
    if targets.is_empty() {
        return Err(PagescopeError::InvalidTarget("No URLs given: pass them as arguments or with --file".into()));
    }
    for target in targets.iter().filter(|t| !t.starts_with("http://") && !t.starts_with("https://")) {
        warn!(url = %target, "Target has no http(s) scheme; the scoring service will likely reject it");
    }

    let client = Arc::new(PageSpeedClient::new(settings.clone())?);
    let runner = BatchAuditRunner::from_settings(client, &settings);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dashboard = Dashboard::new(runner).with_event_channel(tx);

    let mut progress = if quiet || args.json { AuditProgress::hidden() } else { AuditProgress::new() };

    let generation = dashboard.submit(targets, metric);
    while let Some(event) = rx.recv().await {
        progress.handle_event(&event);
        if matches!(event, BatchEvent::BatchCompleted { generation: g, .. } if g == generation) {
            break;
        }
    }

    let report = dashboard.report();
    info!(succeeded = report.succeeded(), failed = report.failed(), "Audit finished");

    let output = args.output.clone().or(config.output.as_ref().and_then(|o| o.report.clone()));
    if let Some(path) = output {
        report.write_to(&PathBuf::from(&path)).await?;
        if !quiet && !args.json {
            eprintln!("Report written to {}", path);
        }
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else if !quiet {
        println!("\n{}", format_summary_markdown(&report, args.details));
    }

    Ok(())
}

/// Positional URLs first, then the `--file` contents, normalized together.
async fn gather_targets(args: &AuditArgs) -> Result<Vec<String>, PagescopeError> {
    let mut entries = collect_targets(&args.urls);

    if let Some(file) = &args.file {
        let content = if file == "-" {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        } else {
            tokio::fs::read_to_string(file).await.map_err(|e| {
                PagescopeError::InvalidTarget(format!("Cannot read URL list {}: {}", file, e))
            })?
        };
        entries.extend(parse_targets(&content));
    }

    Ok(collect_targets(entries))
}
