pub mod catalog;
pub mod generate;
pub mod init;
pub mod show;
pub mod validate;

use roadmapgen_core::config::{RoadmapConfig, TrackConfig};

/// The tracks a command should act on: `name` alone, or every track.
pub fn select_tracks(
    config: &RoadmapConfig,
    name: Option<&str>,
) -> anyhow::Result<Vec<TrackConfig>> {
    match name {
        Some(name) => Ok(vec![config.track(name)?.clone()]),
        None => Ok(config.tracks.clone()),
    }
}
