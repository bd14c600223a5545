//! Scrape-and-notify command.

use anyhow::Context;
use console::style;

use farewatch::config::Settings;
use farewatch::pipeline::{next_run_after, parse_run_at, RunSummary};

use crate::cli::helpers::{build_pipeline, open_store};

/// Run the pipeline once, or daily with `--daemon`.
pub async fn cmd_run(
    settings: &Settings,
    daemon: bool,
    at: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let store = open_store(settings).await?;
    let pipeline = build_pipeline(settings, store, dry_run)?;

    if dry_run {
        println!(
            "{} Dry run: alerts are logged, not sent",
            style("!").yellow()
        );
    }

    if daemon {
        let run_at_str = at.unwrap_or(&settings.run_at);
        let run_at = parse_run_at(run_at_str)
            .with_context(|| format!("Invalid run time '{run_at_str}', expected HH:MM"))?;
        println!(
            "{} Running daily at {} UTC, next run {}",
            style("→").cyan(),
            run_at.format("%H:%M"),
            next_run_after(chrono::Utc::now(), run_at).format("%Y-%m-%d %H:%M")
        );
        pipeline.run_daily(run_at).await;
        return Ok(());
    }

    match pipeline.run_once().await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            println!("{} Run failed ({}): {}", style("✗").red(), e.kind(), e);
            Err(e.into())
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} new listing(s)",
        style("✓").green(),
        summary.records_processed
    );
    if summary.dispatch.matched > 0 {
        println!(
            "  {} {} of {} alert(s) delivered",
            style("→").dim(),
            summary.dispatch.delivered,
            summary.dispatch.matched
        );
    }
    for failure in &summary.dispatch.failed {
        println!(
            "  {} {} via {}: {}",
            style("✗").red(),
            failure.email,
            failure.channel,
            failure.error
        );
    }
    if summary.pruned > 0 {
        println!(
            "  {} Pruned {} old listing(s)",
            style("→").dim(),
            summary.pruned
        );
    }
}
