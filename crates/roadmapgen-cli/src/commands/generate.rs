//! The `roadmapgen generate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use roadmapgen_core::config::load_config_from;
use roadmapgen_core::engine::{MonthSummary, ProgressReporter, RoadmapEngine, RunSummary, SkippedItem};
use roadmapgen_core::extract::ExtractedDocument;
use roadmapgen_report::summary::RoadmapSummary;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_document_extracted(&self, document: &ExtractedDocument) {
        eprintln!(
            "  Extracted: {} [{}] ({} pages)",
            document.path.display(),
            document.month,
            document.page_count()
        );
    }

    fn on_item_skipped(&self, item: &SkippedItem) {
        match item {
            SkippedItem::Document { path, reason, .. } => {
                eprintln!("  SKIPPED document {}: {reason}", path.display());
            }
            SkippedItem::Month {
                month, documents, ..
            } => {
                eprintln!("  SKIPPED month '{month}' ({documents} documents): not in month order");
            }
        }
    }

    fn on_month_scheduled(&self, month: &MonthSummary) {
        eprintln!(
            "  Scheduled: {} -> {} ({} problems)",
            month.source, month.display, month.problems
        );
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        eprintln!(
            "\nComplete: {} problems in {} months, {} skipped ({}ms)",
            summary.total_problems(),
            summary.months.len(),
            summary.skipped.len(),
            summary.duration_ms
        );
    }
}

pub async fn execute(track: Option<String>, config_path: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let tracks = super::select_tracks(&config, track.as_deref())?;
    let engine = RoadmapEngine::new(config)?;
    let reporter = ConsoleReporter;

    let mut failed = Vec::new();

    for track in &tracks {
        eprintln!(
            "roadmapgen v{}: track '{}' from {}",
            env!("CARGO_PKG_VERSION"),
            track.name,
            track.input_dir.display()
        );

        let outcome = if dry_run {
            engine.build(track, &reporter).await
        } else {
            engine.regenerate(track, &reporter).await
        };

        match outcome {
            Ok(outcome) => {
                print_summary(&outcome.summary);
                if dry_run {
                    print!("{}", RoadmapSummary::from_artifact(&outcome.artifact).to_text());
                } else if let Some(path) = &outcome.summary.artifact_path {
                    eprintln!("Artifact saved to: {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("  ERROR: track '{}': {e}", track.name);
                failed.push(track.name.clone());
            }
        }
        eprintln!();
    }

    if !failed.is_empty() {
        anyhow::bail!("{} track(s) failed: {}", failed.len(), failed.join(", "));
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Source", "Documents", "Problems", "Bonus"]);

    for month in &summary.months {
        table.add_row(vec![
            Cell::new(&month.display),
            Cell::new(&month.source),
            Cell::new(month.documents),
            Cell::new(month.problems),
            Cell::new(month.bonus),
        ]);
    }

    eprintln!("\n{table}");

    if !summary.skipped.is_empty() {
        eprintln!(
            "{} document(s) skipped, {} unmapped month(s)",
            summary.skipped_documents(),
            summary.unmapped_months()
        );
    }
}
