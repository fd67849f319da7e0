//! Markdown checklist rendering.

use std::path::Path;

use anyhow::{Context, Result};

use roadmapgen_core::model::{DayEntry, RoadmapArtifact};

/// Render `artifact` as a checklist: one section per month, one
/// subsection per non-empty day.
pub fn generate_markdown(artifact: &RoadmapArtifact) -> String {
    let mut md = String::from("# Roadmap\n");

    for (label, days) in artifact.months() {
        md.push_str(&format!("\n## {label}\n"));
        for day in days.iter().filter(|d| !d.problems().is_empty()) {
            md.push_str(&format!("\n### {}\n\n", day_heading(day)));
            for problem in day.problems() {
                md.push_str(&format!("- [ ] [{}]({})\n", problem.name, problem.url));
            }
        }
    }

    md
}

fn day_heading(day: &DayEntry) -> String {
    match day {
        DayEntry::Bonus { day, .. } => format!("Day {day} (Bonus)"),
        DayEntry::Regular { day, .. } => format!("Day {day}"),
    }
}

/// Write the Markdown rendering of `artifact` to `path`.
pub fn write_markdown_report(artifact: &RoadmapArtifact, path: &Path) -> Result<()> {
    std::fs::write(path, generate_markdown(artifact))
        .with_context(|| format!("failed to write markdown to {}", path.display()))?;
    Ok(())
}
