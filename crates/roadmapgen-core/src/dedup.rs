//! Order-preserving de-duplication of problem records.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::model::{normalize_name, ProblemRecord};

/// Insertion-ordered set of problems keyed by normalized name.
///
/// The first record inserted for a name wins; later duplicates are dropped
/// and iteration yields records in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct OrderedProblemSet {
    entries: IndexMap<String, ProblemRecord>,
}

impl OrderedProblemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` unless its normalized name is already present.
    /// Returns `true` if it was added.
    pub fn insert(&mut self, record: ProblemRecord) -> bool {
        match self.entries.entry(record.normalized_name()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&ProblemRecord> {
        self.entries.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProblemRecord> {
        self.entries.values()
    }

    pub fn into_vec(self) -> Vec<ProblemRecord> {
        self.entries.into_values().collect()
    }
}

impl Extend<ProblemRecord> for OrderedProblemSet {
    fn extend<I: IntoIterator<Item = ProblemRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<ProblemRecord> for OrderedProblemSet {
    fn from_iter<I: IntoIterator<Item = ProblemRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
