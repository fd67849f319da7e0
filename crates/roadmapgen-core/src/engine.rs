//! Roadmap pipeline orchestrator.
//!
//! Extract → parse → de-duplicate → schedule → serialize, once per
//! regenerate call. Documents are extracted concurrently, but each month's
//! lines are consumed in configured month order and file-name order so the
//! output never depends on which extraction finished first.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::{RoadmapConfig, TrackConfig};
use crate::dedup::OrderedProblemSet;
use crate::error::{ConfigError, ExtractionError, RegenerateError, UnmappedMonthError};
use crate::extract::{discover_documents, ExtractedDocument, ExtractorSet};
use crate::model::{MonthKey, RoadmapArtifact};
use crate::months::MonthMapper;
use crate::parser::LineParser;
use crate::schedule::Scheduler;
use crate::slug::SlugGenerator;

/// A document or month left out of the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SkippedItem {
    /// The document could not be extracted.
    Document {
        path: PathBuf,
        month: String,
        reason: String,
    },
    /// The month is not in the configured month order.
    Month {
        month: String,
        documents: usize,
        reason: String,
    },
}

/// Per-month result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub source: String,
    pub display: String,
    pub documents: usize,
    /// Unique solved problems scheduled.
    pub problems: usize,
    /// Problems on the bonus day.
    pub bonus: usize,
}

/// What a run did, returned alongside success.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub track: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Documents found in the input directory.
    pub documents_found: usize,
    pub months: Vec<MonthSummary>,
    pub skipped: Vec<SkippedItem>,
    /// Set once the artifact has been written.
    pub artifact_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn skipped_documents(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, SkippedItem::Document { .. }))
            .count()
    }

    pub fn unmapped_months(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, SkippedItem::Month { .. }))
            .count()
    }

    pub fn total_problems(&self) -> usize {
        self.months.iter().map(|m| m.problems).sum()
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub artifact: RoadmapArtifact,
    pub summary: RunSummary,
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_document_extracted(&self, document: &ExtractedDocument);
    fn on_item_skipped(&self, item: &SkippedItem);
    fn on_month_scheduled(&self, month: &MonthSummary);
    fn on_run_complete(&self, summary: &RunSummary);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_document_extracted(&self, _: &ExtractedDocument) {}
    fn on_item_skipped(&self, _: &SkippedItem) {}
    fn on_month_scheduled(&self, _: &MonthSummary) {}
    fn on_run_complete(&self, _: &RunSummary) {}
}

/// Outcome of extracting one discovered file.
#[derive(Debug)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub month: MonthKey,
    pub document: Result<ExtractedDocument, ExtractionError>,
}

/// In-memory output of the parse / de-dup / schedule stages.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub artifact: RoadmapArtifact,
    pub months: Vec<MonthSummary>,
    pub unmapped: Vec<SkippedItem>,
}

/// Parse, de-duplicate and schedule already-extracted documents.
///
/// `documents` must be in file-name order; several documents for the same
/// month are read in that order. Months follow the mapper's order. Months
/// missing from the mapper are reported in [`Assembly::unmapped`].
pub fn assemble(
    documents: &[ExtractedDocument],
    mapper: &MonthMapper,
    parser: &LineParser,
    scheduler: &Scheduler,
    slugs: &SlugGenerator,
) -> Assembly {
    let mut by_month: Vec<Vec<&ExtractedDocument>> = vec![Vec::new(); mapper.len()];
    let mut unmapped: Vec<(MonthKey, usize, String)> = Vec::new();

    for doc in documents {
        match mapper.position(&doc.month) {
            Some(index) => by_month[index].push(doc),
            None => {
                if let Some(entry) = unmapped.iter_mut().find(|(m, _, _)| *m == doc.month) {
                    entry.1 += 1;
                } else {
                    let reason = UnmappedMonthError {
                        month: doc.month.to_string(),
                    }
                    .to_string();
                    unmapped.push((doc.month.clone(), 1, reason));
                }
            }
        }
    }

    let mut assembly = Assembly::default();

    for ((source, label), docs) in mapper.entries().zip(by_month) {
        if docs.is_empty() {
            tracing::debug!(month = %source, "no documents for configured month");
            continue;
        }

        let problems: OrderedProblemSet = docs
            .iter()
            .copied()
            .flat_map(|doc| parser.solved(doc.lines()))
            .map(|parsed| parsed.into_record(slugs))
            .collect();

        let days = scheduler.schedule(problems.into_vec());
        let bonus: usize = days
            .iter()
            .filter(|d| d.is_bonus())
            .map(|d| d.problems().len())
            .sum();
        let total: usize = days.iter().map(|d| d.problems().len()).sum();

        tracing::info!(month = %source, display = label, problems = total, bonus, "month scheduled");
        assembly.months.push(MonthSummary {
            source: source.to_string(),
            display: label.to_string(),
            documents: docs.len(),
            problems: total,
            bonus,
        });
        assembly.artifact.insert_month(label, days);
    }

    assembly.unmapped = unmapped
        .into_iter()
        .map(|(month, documents, reason)| {
            tracing::warn!(month = %month, documents, "skipping unmapped month");
            SkippedItem::Month {
                month: month.to_string(),
                documents,
                reason,
            }
        })
        .collect();

    assembly
}

/// The roadmap engine. One instance serves every regenerate request.
pub struct RoadmapEngine {
    config: RoadmapConfig,
    extractors: ExtractorSet,
    parser: LineParser,
    scheduler: Scheduler,
    slugs: SlugGenerator,
    guard: Mutex<()>,
}

impl RoadmapEngine {
    pub fn new(config: RoadmapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = config.scheduler()?;
        let slugs = config.slug_generator();
        Ok(Self {
            config,
            extractors: ExtractorSet::builtin(),
            parser: LineParser::new(),
            scheduler,
            slugs,
            guard: Mutex::new(()),
        })
    }

    pub fn with_extractors(mut self, extractors: ExtractorSet) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn with_parser(mut self, parser: LineParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &RoadmapConfig {
        &self.config
    }

    pub fn parser(&self) -> &LineParser {
        &self.parser
    }

    /// Discover and extract every document of `track`, in file-name order.
    pub async fn extract_track(
        &self,
        track: &TrackConfig,
    ) -> Result<Vec<DocumentResult>, RegenerateError> {
        let paths = discover_documents(&track.input_dir, &self.extractors).map_err(|source| {
            RegenerateError::InputDir {
                path: track.input_dir.clone(),
                source,
            }
        })?;
        tracing::info!(track = %track.name, documents = paths.len(), "discovered documents");

        let convention = track.convention;
        let results = stream::iter(paths)
            .map(|path| {
                let extractors = self.extractors.clone();
                let month = convention.month_key(&path);
                async move {
                    let task_path = path.clone();
                    let task_month = month.clone();
                    let joined = tokio::task::spawn_blocking(move || {
                        extractors.extract(&task_path, task_month)
                    })
                    .await;
                    let document = joined.unwrap_or_else(|e| {
                        Err(ExtractionError::Aborted {
                            path: path.clone(),
                            reason: e.to_string(),
                        })
                    });
                    DocumentResult {
                        path,
                        month,
                        document,
                    }
                }
            })
            .buffered(self.config.parallelism.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(results)
    }

    /// Run the pipeline for `track` without writing anything.
    pub async fn build(
        &self,
        track: &TrackConfig,
        progress: &dyn ProgressReporter,
    ) -> Result<RunOutcome, RegenerateError> {
        let start = Instant::now();
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        let mapper = track.month_mapper()?;

        let results = self.extract_track(track).await?;
        let documents_found = results.len();

        let mut documents = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for result in results {
            match result.document {
                Ok(doc) => {
                    progress.on_document_extracted(&doc);
                    documents.push(doc);
                }
                Err(e) => {
                    tracing::warn!(path = %result.path.display(), error = %e, "skipping document");
                    let item = SkippedItem::Document {
                        path: result.path,
                        month: result.month.to_string(),
                        reason: e.to_string(),
                    };
                    progress.on_item_skipped(&item);
                    skipped.push(item);
                }
            }
        }

        let assembly = assemble(
            &documents,
            &mapper,
            &self.parser,
            &self.scheduler,
            &self.slugs,
        );
        for item in &assembly.unmapped {
            progress.on_item_skipped(item);
        }
        for month in &assembly.months {
            progress.on_month_scheduled(month);
        }
        skipped.extend(assembly.unmapped);

        let summary = RunSummary {
            run_id,
            track: track.name.clone(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            documents_found,
            months: assembly.months,
            skipped,
            artifact_path: None,
        };

        Ok(RunOutcome {
            artifact: assembly.artifact,
            summary,
        })
    }

    /// Regenerate the artifact of `track` from its current input directory.
    ///
    /// Concurrent calls are serialized. On any error the previous artifact
    /// is left as it was.
    pub async fn regenerate(
        &self,
        track: &TrackConfig,
        progress: &dyn ProgressReporter,
    ) -> Result<RunOutcome, RegenerateError> {
        let _guard = self.guard.lock().await;

        let mut outcome = self.build(track, progress).await?;
        if outcome.artifact.is_empty() {
            return Err(RegenerateError::EmptyRoadmap {
                track: track.name.clone(),
            });
        }

        let path = self.config.artifact_path(track);
        outcome.artifact.write_atomic(&path)?;
        outcome.summary.artifact_path = Some(path);

        progress.on_run_complete(&outcome.summary);
        Ok(outcome)
    }

    /// Regenerate the track called `name`.
    pub async fn regenerate_named(
        &self,
        name: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<RunOutcome, RegenerateError> {
        let track = self.config.track(name)?.clone();
        self.regenerate(&track, progress).await
    }
}
