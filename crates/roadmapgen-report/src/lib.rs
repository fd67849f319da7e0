//! roadmapgen-report: Human-readable renderings of roadmap artifacts.

pub mod markdown;
pub mod summary;
