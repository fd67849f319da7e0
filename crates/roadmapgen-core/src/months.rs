//! Source month label to display label mapping.

use std::collections::HashSet;

use crate::error::{ConfigError, UnmappedMonthError};
use crate::model::{normalize_name, MonthKey};

/// Ordered, bijective table from source month labels to display labels.
///
/// Source labels are compared case-insensitively, so a file named
/// `july.txt` maps through a configured `"July"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthMapper {
    entries: Vec<(MonthKey, String)>,
}

impl MonthMapper {
    /// Build a mapper. Without explicit display labels the i-th source label
    /// is shown as `Month {i + 1}`.
    pub fn new(
        source_labels: Vec<String>,
        display_labels: Option<Vec<String>>,
    ) -> Result<Self, ConfigError> {
        let display_labels = match display_labels {
            Some(labels) => {
                if labels.len() != source_labels.len() {
                    return Err(ConfigError::LabelCountMismatch {
                        sources: source_labels.len(),
                        displays: labels.len(),
                    });
                }
                labels
            }
            None => (1..=source_labels.len())
                .map(|i| format!("Month {i}"))
                .collect(),
        };

        let mut seen_sources = HashSet::new();
        let mut seen_displays = HashSet::new();
        let mut entries = Vec::with_capacity(source_labels.len());

        for (source, display) in source_labels.into_iter().zip(display_labels) {
            let source = source.trim().to_string();
            let display = display.trim().to_string();
            if !seen_sources.insert(normalize_name(&source)) {
                return Err(ConfigError::DuplicateSourceLabel(source));
            }
            if !seen_displays.insert(display.clone()) {
                return Err(ConfigError::DuplicateDisplayLabel(display));
            }
            entries.push((MonthKey::new(source), display));
        }

        Ok(Self { entries })
    }

    /// Display label of `key`.
    pub fn map(&self, key: &MonthKey) -> Result<&str, UnmappedMonthError> {
        self.position(key)
            .map(|i| self.entries[i].1.as_str())
            .ok_or_else(|| UnmappedMonthError {
                month: key.to_string(),
            })
    }

    /// Index of `key` in the configured order.
    pub fn position(&self, key: &MonthKey) -> Option<usize> {
        let wanted = normalize_name(key.as_str());
        self.entries
            .iter()
            .position(|(source, _)| normalize_name(source.as_str()) == wanted)
    }

    /// Reverse lookup: the source label shown as `display`.
    pub fn source_for(&self, display: &str) -> Option<&MonthKey> {
        self.entries
            .iter()
            .find(|(_, label)| label == display)
            .map(|(source, _)| source)
    }

    /// `(source, display)` pairs in configured order.
    pub fn entries(&self) -> impl Iterator<Item = (&MonthKey, &str)> {
        self.entries
            .iter()
            .map(|(source, display)| (source, display.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
