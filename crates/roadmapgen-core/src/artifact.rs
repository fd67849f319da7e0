//! Artifact serialization with whole-file replace semantics.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::error::SerializationError;
use crate::model::RoadmapArtifact;

impl RoadmapArtifact {
    /// Pretty-printed JSON (two-space indent) with a trailing newline.
    ///
    /// Contains no timestamps or run ids, so unchanged input gives
    /// byte-identical output.
    pub fn to_json_string(&self) -> Result<String, SerializationError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Replace the artifact at `path`.
    ///
    /// The JSON is written to a temporary file next to `path` and renamed
    /// over it, so readers see either the old or the new artifact and a
    /// failed write leaves the old one untouched.
    pub fn write_atomic(&self, path: &Path) -> Result<(), SerializationError> {
        let json = self.to_json_string()?;
        let write_err = |source| SerializationError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| SerializationError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::info!(path = %path.display(), months = self.len(), "artifact written");
        Ok(())
    }

    /// Load an artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read artifact from {}", path.display()))?;
        let artifact: RoadmapArtifact = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse artifact JSON: {}", path.display()))?;
        Ok(artifact)
    }
}
