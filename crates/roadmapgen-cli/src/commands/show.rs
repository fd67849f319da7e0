//! The `roadmapgen show` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use roadmapgen_core::model::RoadmapArtifact;
use roadmapgen_report::markdown::{generate_markdown, write_markdown_report};
use roadmapgen_report::summary::RoadmapSummary;

pub fn execute(
    artifact_path: PathBuf,
    format: String,
    month: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut artifact = RoadmapArtifact::load(&artifact_path)?;

    if let Some(label) = &month {
        let days = artifact
            .month(label)
            .with_context(|| {
                format!(
                    "month '{label}' not found. Available: {:?}",
                    artifact.month_labels().collect::<Vec<_>>()
                )
            })?
            .to_vec();
        artifact = RoadmapArtifact::new();
        artifact.insert_month(label.as_str(), days);
    }

    let rendered = match (format.as_str(), &output) {
        ("markdown", Some(path)) => {
            write_markdown_report(&artifact, path)?;
            eprintln!("Markdown saved to: {}", path.display());
            return Ok(());
        }
        ("text", _) => RoadmapSummary::from_artifact(&artifact).to_text(),
        ("markdown", None) => generate_markdown(&artifact),
        ("json", _) => artifact.to_json_string()?,
        (other, _) => anyhow::bail!("unknown format: {other} (expected text, markdown or json)"),
    };

    match &output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved to: {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
