//! Daily distribution of a month's problems.

use crate::error::ConfigError;
use crate::model::{DayEntry, ProblemRecord};

/// Days in a scheduled month; the last one is the bonus day.
pub const DAYS_PER_MONTH: u32 = 30;

/// Capacity of every regular day.
pub const PROBLEMS_PER_DAY: usize = 3;

/// Splits an ordered problem list into calendar days.
///
/// Problems are chunked sequentially, `per_day` at a time, one chunk per
/// regular day. The final day is a [`DayEntry::Bonus`] holding its own chunk
/// and every chunk that would land after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    days: u32,
    per_day: usize,
}

impl Scheduler {
    pub fn new(days: u32, per_day: usize) -> Result<Self, ConfigError> {
        if days == 0 {
            return Err(ConfigError::InvalidSchedule(
                "days_per_month must be at least 1".into(),
            ));
        }
        if per_day == 0 {
            return Err(ConfigError::InvalidSchedule(
                "problems_per_day must be at least 1".into(),
            ));
        }
        Ok(Self { days, per_day })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn per_day(&self) -> usize {
        self.per_day
    }

    /// Number of problems the regular days can hold.
    pub fn regular_capacity(&self) -> usize {
        (self.days as usize - 1) * self.per_day
    }

    /// Produce exactly `days` entries, in ascending day order.
    pub fn schedule(&self, problems: Vec<ProblemRecord>) -> Vec<DayEntry> {
        let mut remaining = problems.into_iter();
        let mut entries = Vec::with_capacity(self.days as usize);

        for day in 1..self.days {
            let chunk: Vec<ProblemRecord> = remaining.by_ref().take(self.per_day).collect();
            entries.push(DayEntry::Regular {
                day,
                problems: chunk,
            });
        }

        entries.push(DayEntry::Bonus {
            day: self.days,
            problems: remaining.collect(),
        });

        entries
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            days: DAYS_PER_MONTH,
            per_day: PROBLEMS_PER_DAY,
        }
    }
}
