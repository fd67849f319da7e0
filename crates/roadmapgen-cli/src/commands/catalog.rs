//! The `roadmapgen catalog` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use roadmapgen_core::catalog::{Difficulty, ProblemCatalog};
use roadmapgen_core::config::load_config_from;
use roadmapgen_core::model::RoadmapArtifact;

pub fn execute(config_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut artifacts = Vec::new();
    for track in &config.tracks {
        let path = config.artifact_path(track);
        if !path.exists() {
            tracing::warn!(track = %track.name, path = %path.display(), "no artifact, skipping track");
            continue;
        }
        artifacts.push((track.name.as_str(), RoadmapArtifact::load(&path)?));
    }

    anyhow::ensure!(
        !artifacts.is_empty(),
        "no track artifacts found; run `roadmapgen generate` first"
    );

    let catalog =
        ProblemCatalog::from_artifacts(artifacts.iter().map(|(name, artifact)| (*name, artifact)));
    let json = catalog.to_json_string()?;

    match &output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write catalog to {}", path.display()))?;
            eprintln!("Catalog saved to: {}", path.display());
        }
        None => print!("{json}"),
    }

    eprintln!(
        "{} problems ({} easy, {} medium, {} hard)",
        catalog.len(),
        catalog.count(Difficulty::Easy),
        catalog.count(Difficulty::Medium),
        catalog.count(Difficulty::Hard)
    );

    Ok(())
}
