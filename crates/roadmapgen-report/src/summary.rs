//! Plain-text roadmap summary.

use serde::Serialize;

use roadmapgen_core::model::{DayEntry, RoadmapArtifact};

/// Number of days shown in each month's preview.
const PREVIEW_DAYS: usize = 3;

/// Totals for one month of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub label: String,
    pub problems: usize,
    /// Regular days with at least one problem.
    pub regular_days_used: usize,
    pub bonus_problems: usize,
    /// First non-empty days, as `(day, problem names)`.
    pub preview: Vec<(u32, Vec<String>)>,
}

/// Per-month totals of an artifact, in artifact order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapSummary {
    pub months: Vec<MonthTotals>,
}

impl RoadmapSummary {
    pub fn from_artifact(artifact: &RoadmapArtifact) -> Self {
        let months = artifact
            .months()
            .map(|(label, days)| month_totals(label, days))
            .collect();
        Self { months }
    }

    pub fn total_problems(&self) -> usize {
        self.months.iter().map(|m| m.problems).sum()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for month in &self.months {
            out.push_str(&format!(
                "{}: {} problems over {} days",
                month.label, month.problems, month.regular_days_used
            ));
            if month.bonus_problems > 0 {
                out.push_str(&format!(" (+{} on the bonus day)", month.bonus_problems));
            }
            out.push('\n');
            for (day, names) in &month.preview {
                out.push_str(&format!("  Day {day}: {}\n", names.join(", ")));
            }
        }
        out.push_str(&format!(
            "Total: {} problems in {} months\n",
            self.total_problems(),
            self.months.len()
        ));
        out
    }
}

fn month_totals(label: &str, days: &[DayEntry]) -> MonthTotals {
    let problems = days.iter().map(|d| d.problems().len()).sum();
    let regular_days_used = days
        .iter()
        .filter(|d| !d.is_bonus() && !d.problems().is_empty())
        .count();
    let bonus_problems = days
        .iter()
        .filter(|d| d.is_bonus())
        .map(|d| d.problems().len())
        .sum();
    let preview = days
        .iter()
        .filter(|d| !d.problems().is_empty())
        .take(PREVIEW_DAYS)
        .map(|d| {
            let names = d.problems().iter().map(|p| p.name.clone()).collect();
            (d.day(), names)
        })
        .collect();

    MonthTotals {
        label: label.to_string(),
        problems,
        regular_days_used,
        bonus_problems,
        preview,
    }
}
