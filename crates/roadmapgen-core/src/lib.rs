//! roadmapgen-core: Submission-export parsing, de-duplication and scheduling.
//!
//! This crate turns exported submission histories into the day-by-day
//! roadmap artifact that study-plan front ends read.

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod months;
pub mod parser;
pub mod schedule;
pub mod slug;
