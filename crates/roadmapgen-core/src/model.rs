//! Core data model types for roadmapgen.
//!
//! These are the types every pipeline stage hands to the next: the month a
//! document belongs to, the problems recognised in it, and the scheduled
//! days that end up in the output artifact.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of a single submission as printed in a submission export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    RuntimeError,
    CompileError,
    InternalError,
}

impl SubmissionStatus {
    /// Every status an export can contain.
    pub const ALL: [SubmissionStatus; 8] = [
        SubmissionStatus::Accepted,
        SubmissionStatus::WrongAnswer,
        SubmissionStatus::TimeLimitExceeded,
        SubmissionStatus::MemoryLimitExceeded,
        SubmissionStatus::OutputLimitExceeded,
        SubmissionStatus::RuntimeError,
        SubmissionStatus::CompileError,
        SubmissionStatus::InternalError,
    ];

    /// The token as it appears in exported text.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Accepted => "Accepted",
            SubmissionStatus::WrongAnswer => "Wrong Answer",
            SubmissionStatus::TimeLimitExceeded => "Time Limit Exceeded",
            SubmissionStatus::MemoryLimitExceeded => "Memory Limit Exceeded",
            SubmissionStatus::OutputLimitExceeded => "Output Limit Exceeded",
            SubmissionStatus::RuntimeError => "Runtime Error",
            SubmissionStatus::CompileError => "Compile Error",
            SubmissionStatus::InternalError => "Internal Error",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionStatus::Accepted)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.split_whitespace().collect::<Vec<_>>().join(" ");
        SubmissionStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown submission status: {s}"))
    }
}

/// The source month a document belongs to, before display-label mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MonthKey {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for MonthKey {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Lower-cased, whitespace-trimmed problem name used as the de-duplication key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single accepted problem entry with its derived external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// Problem title as recognised in the export.
    pub name: String,
    /// Status token, always "Accepted" for scheduled problems.
    pub status: String,
    /// Whether the submission was accepted.
    pub solved: bool,
    /// Canonical problem URL.
    pub url: String,
}

impl ProblemRecord {
    /// Build the record for an accepted submission.
    pub fn solved(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: SubmissionStatus::Accepted.label().to_string(),
            solved: true,
            url: url.into(),
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// One scheduled day of a month.
///
/// The last day of a month is always the [`DayEntry::Bonus`] variant: it
/// takes its own share of problems plus everything that did not fit into the
/// regular days, so its length is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DayRecord", from = "DayRecord")]
pub enum DayEntry {
    Regular {
        day: u32,
        problems: Vec<ProblemRecord>,
    },
    Bonus {
        day: u32,
        problems: Vec<ProblemRecord>,
    },
}

impl DayEntry {
    pub fn day(&self) -> u32 {
        match self {
            DayEntry::Regular { day, .. } | DayEntry::Bonus { day, .. } => *day,
        }
    }

    pub fn problems(&self) -> &[ProblemRecord] {
        match self {
            DayEntry::Regular { problems, .. } | DayEntry::Bonus { problems, .. } => problems,
        }
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self, DayEntry::Bonus { .. })
    }
}

/// Wire shape of a day object in the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DayRecord {
    day: u32,
    problems: Vec<ProblemRecord>,
    #[serde(rename = "isBonus", default)]
    is_bonus: bool,
}

impl From<DayEntry> for DayRecord {
    fn from(entry: DayEntry) -> Self {
        match entry {
            DayEntry::Regular { day, problems } => DayRecord {
                day,
                problems,
                is_bonus: false,
            },
            DayEntry::Bonus { day, problems } => DayRecord {
                day,
                problems,
                is_bonus: true,
            },
        }
    }
}

impl From<DayRecord> for DayEntry {
    fn from(record: DayRecord) -> Self {
        if record.is_bonus {
            DayEntry::Bonus {
                day: record.day,
                problems: record.problems,
            }
        } else {
            DayEntry::Regular {
                day: record.day,
                problems: record.problems,
            }
        }
    }
}

/// The complete output of one run: display month label to its days.
///
/// Key order is the configured month order; day order is ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadmapArtifact {
    months: IndexMap<String, Vec<DayEntry>>,
}

impl RoadmapArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a month. Months are kept in insertion order.
    pub fn insert_month(&mut self, display_label: impl Into<String>, days: Vec<DayEntry>) {
        self.months.insert(display_label.into(), days);
    }

    pub fn month(&self, display_label: &str) -> Option<&[DayEntry]> {
        self.months.get(display_label).map(Vec::as_slice)
    }

    pub fn months(&self) -> impl Iterator<Item = (&str, &[DayEntry])> {
        self.months
            .iter()
            .map(|(label, days)| (label.as_str(), days.as_slice()))
    }

    pub fn month_labels(&self) -> impl Iterator<Item = &str> {
        self.months.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Total number of scheduled problems across all months.
    pub fn total_problems(&self) -> usize {
        self.months
            .values()
            .flatten()
            .map(|day| day.problems().len())
            .sum()
    }
}
