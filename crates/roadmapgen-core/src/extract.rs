//! Text extraction from exported submission documents.
//!
//! Extractors turn a file into pages of text; nothing here interprets the
//! text. [`ExtractedDocument::lines`] is the only way later stages see it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::model::MonthKey;

/// Page separator used by text exports.
const PAGE_BREAK: char = '\x0c';

const CALENDAR_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static NUMBERED_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)month[\s_-]*(\d+)").expect("numbered month regex"));

/// 1-based location of a line inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LinePosition {
    pub page: usize,
    pub line: usize,
}

/// One line of extracted text with the month it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub month: &'a MonthKey,
    pub text: &'a str,
    pub position: LinePosition,
}

/// The text of one document, split into pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub path: PathBuf,
    pub month: MonthKey,
    pages: Vec<String>,
}

impl ExtractedDocument {
    pub fn new(path: impl Into<PathBuf>, month: MonthKey, pages: Vec<String>) -> Self {
        Self {
            path: path.into(),
            month,
            pages,
        }
    }

    /// Build a document from text whose pages are separated by form feeds.
    pub fn from_text(path: impl Into<PathBuf>, month: MonthKey, text: &str) -> Self {
        Self::new(path, month, split_pages(text))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Lines in reading order: page order, then line order within a page.
    ///
    /// The iterator borrows the document, so calling this again restarts
    /// from the first line.
    pub fn lines(&self) -> impl Iterator<Item = RawLine<'_>> + '_ {
        let month = &self.month;
        self.pages.iter().enumerate().flat_map(move |(page, text)| {
            text.lines().enumerate().map(move |(line, text)| RawLine {
                month,
                text,
                position: LinePosition {
                    page: page + 1,
                    line: line + 1,
                },
            })
        })
    }
}

fn split_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK).map(str::to_string).collect()
}

/// A source of document text.
pub trait TextExtractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether this extractor handles `path`.
    fn supports(&self, path: &Path) -> bool;

    /// Read `path` and return its text, one entry per page.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ExtractionError> {
    std::fs::read(path).map_err(|source| ExtractionError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Already-exported `.txt` files. Content must be UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "text"
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, "txt")
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let bytes = read_bytes(path)?;
        let text = String::from_utf8(bytes).map_err(|e| ExtractionError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(split_pages(&text))
    }
}

/// PDF submission exports.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

#[cfg(feature = "pdf")]
impl TextExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let bytes = read_bytes(path)?;
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ExtractionError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(split_pages(&text))
    }
}

/// Extractors tried in registration order; the first that supports a file
/// handles it.
#[derive(Clone)]
pub struct ExtractorSet {
    extractors: Vec<Arc<dyn TextExtractor>>,
}

impl ExtractorSet {
    /// A set with no extractors.
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Plain text, plus PDF when built with the `pdf` feature.
    pub fn builtin() -> Self {
        let set = Self::empty().with_extractor(PlainTextExtractor);
        #[cfg(feature = "pdf")]
        let set = set.with_extractor(PdfExtractor);
        set
    }

    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractors.push(Arc::new(extractor));
        self
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.extractors.iter().any(|e| e.supports(path))
    }

    /// Extract `path` and tag it with `month`.
    pub fn extract(&self, path: &Path, month: MonthKey) -> Result<ExtractedDocument, ExtractionError> {
        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supports(path))
            .ok_or_else(|| ExtractionError::Unsupported {
                path: path.to_path_buf(),
            })?;

        tracing::debug!(path = %path.display(), extractor = extractor.name(), "extracting document");
        let pages = extractor.extract_pages(path)?;
        Ok(ExtractedDocument::new(path, month, pages))
    }
}

impl Default for ExtractorSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ExtractorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.extractors.iter().map(|e| e.name()))
            .finish()
    }
}

/// How a document's file name identifies its month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameConvention {
    /// An English month name anywhere in the file name: `"July Roadmap.pdf"`.
    #[default]
    Calendar,
    /// `month <n>` in the file name: `"Month 2 Intermediate.pdf"`.
    Numbered,
}

impl FilenameConvention {
    /// Month of the file at `path`. Falls back to the file stem when the
    /// name does not follow the convention.
    pub fn month_key(&self, path: &Path) -> MonthKey {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let recognised = match self {
            FilenameConvention::Calendar => calendar_month(&file_name),
            FilenameConvention::Numbered => numbered_month(&file_name),
        };

        recognised.unwrap_or_else(|| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(file_name);
            MonthKey::new(stem)
        })
    }
}

fn calendar_month(file_name: &str) -> Option<MonthKey> {
    let lower = file_name.to_lowercase();
    CALENDAR_MONTHS
        .iter()
        .find(|month| lower.contains(*month))
        .map(|month| {
            let mut chars = month.chars();
            let capitalised: String = chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default();
            MonthKey::new(capitalised)
        })
}

fn numbered_month(file_name: &str) -> Option<MonthKey> {
    let caps = NUMBERED_MONTH_RE.captures(file_name)?;
    let number: u32 = caps[1].parse().ok()?;
    Some(MonthKey::new(format!("Month {number}")))
}

/// Files in `dir` (non-recursive) that `extractors` can read, sorted by
/// file name.
pub fn discover_documents(dir: &Path, extractors: &ExtractorSet) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && extractors.supports(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
