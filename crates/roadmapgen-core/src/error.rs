//! Error types for the roadmap pipeline.
//!
//! Extraction and month-mapping failures are partial: the engine records
//! them and keeps going. Serialization failures are fatal for a run and
//! leave the previous artifact in place.

use std::path::PathBuf;

use thiserror::Error;

/// A single document could not be read or decoded.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file could not be opened or read.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but are not a usable document.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// No registered extractor handles this file type.
    #[error("no extractor supports {}", path.display())]
    Unsupported { path: PathBuf },

    /// The extraction task did not finish.
    #[error("extraction of {} aborted: {reason}", path.display())]
    Aborted { path: PathBuf, reason: String },
}

impl ExtractionError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ExtractionError::Open { path, .. }
            | ExtractionError::Decode { path, .. }
            | ExtractionError::Unsupported { path }
            | ExtractionError::Aborted { path, .. } => path,
        }
    }
}

/// A month label found in the input is not in the configured month order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("month '{month}' is not in the configured month order")]
pub struct UnmappedMonthError {
    pub month: String,
}

/// The artifact could not be written.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to encode artifact: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write artifact to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace artifact at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid month table or schedule parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("track name must not be empty")]
    EmptyTrackName,

    #[error("duplicate track name: {0}")]
    DuplicateTrack(String),

    #[error("track '{0}' has no months configured")]
    EmptyMonthOrder(String),

    #[error("duplicate source month label: {0}")]
    DuplicateSourceLabel(String),

    #[error("duplicate display month label: {0}")]
    DuplicateDisplayLabel(String),

    #[error("{sources} source month labels but {displays} display labels")]
    LabelCountMismatch { sources: usize, displays: usize },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("unknown track: {0}")]
    UnknownTrack(String),
}

/// Fatal outcomes of a single regenerate call.
#[derive(Debug, Error)]
pub enum RegenerateError {
    #[error("failed to read input directory {}: {source}", path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing could be scheduled; the existing artifact is kept.
    #[error("track '{track}' produced no roadmap data, refusing to overwrite the existing artifact")]
    EmptyRoadmap { track: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}
