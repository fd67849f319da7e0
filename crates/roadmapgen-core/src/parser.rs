//! Submission-line parser.
//!
//! Every export format variant is one [`LineMatcher`]. The parser tries its
//! matchers in a fixed order and the first match wins. A new export format
//! is supported by appending a matcher, never by editing an existing one.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::RawLine;
use crate::model::{ProblemRecord, SubmissionStatus};
use crate::slug::SlugGenerator;

/// Alternation of every status token an export prints.
const STATUS_PATTERN: &str = "Accepted|Wrong Answer|Time Limit Exceeded|Memory Limit Exceeded|Output Limit Exceeded|Runtime Error|Compile Error|Internal Error";

/// A relative time unit such as `3 months`.
const TIME_UNIT_PATTERN: &str = r"(?:year|month|week|day|hour|minute|second)s?";

static RELATIVE_TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*\d+\s+{TIME_UNIT_PATTERN}(?:,?\s*\d+\s+{TIME_UNIT_PATTERN})*\s+ago\s+(?P<name>.+?)\s+(?P<status>{STATUS_PATTERN})(?:\s|$)"
    ))
    .expect("relative timestamp regex")
});

static TRUNCATED_TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*\d+\s+years?,?\s*(?:\d+\s+months?\s+ago)?\s+(?P<name>.+?)\s+(?P<status>{STATUS_PATTERN})(?:\s|$)"
    ))
    .expect("truncated timestamp regex")
});

static ORDINAL_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*#?\d+\s*[.):]\s*(?P<name>.+?)(?:\s+[-–|:])?\s+(?P<status>{STATUS_PATTERN})(?:\s|$)"
    ))
    .expect("ordinal list regex")
});

static BRACKETED_STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*\[(?P<status>{STATUS_PATTERN})\]\s*(?:[-–|:]\s*)?(?P<name>.+?)\s*$"
    ))
    .expect("bracketed status regex")
});

static TABLE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*\|?\s*(?P<name>[^|\t]+?)\s*[|\t]\s*(?P<status>{STATUS_PATTERN})\s*(?:[|\t].*)?$"
    ))
    .expect("table row regex")
});

static TRAILING_RUNTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+\s*ms\b.*$").expect("trailing runtime regex"));

static TRAILING_LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:python3?|cpp|java|javascript|typescript|golang|rust|csharp|kotlin)\b.*$")
        .expect("trailing language regex")
});

/// Column titles of the submission table header.
const HEADER_WORDS: [&str; 4] = ["question", "status", "runtime", "language"];

/// Substrings that mark a captured name as table noise.
const NOISE_FRAGMENTS: [&str; 5] = ["n/a", "python3", "time submitted", "question", "status"];

/// Raw captures of a matcher, before clean-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub name: String,
    pub status: SubmissionStatus,
}

/// Recognises one export format variant.
pub trait LineMatcher: Send + Sync {
    /// Stable identifier, reported in parse statistics.
    fn name(&self) -> &'static str;

    /// Name and status if `line` is in this matcher's format.
    fn match_line(&self, line: &str) -> Option<LineMatch>;
}

/// Matcher backed by a regex with `name` and `status` capture groups.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    id: &'static str,
    pattern: &'static Regex,
}

impl PatternMatcher {
    pub fn new(id: &'static str, pattern: &'static Regex) -> Self {
        Self { id, pattern }
    }

    /// `1 year, 3 months ago Two Sum Accepted 52 ms python3`
    pub fn relative_timestamp() -> Self {
        Self::new("relative-timestamp", &RELATIVE_TIMESTAMP_RE)
    }

    /// `1 year, Two Sum Accepted 52 ms python3`
    pub fn truncated_timestamp() -> Self {
        Self::new("truncated-timestamp", &TRUNCATED_TIMESTAMP_RE)
    }

    /// `1. Two Sum Accepted`
    pub fn ordinal_list() -> Self {
        Self::new("ordinal-list", &ORDINAL_LIST_RE)
    }

    /// `[Accepted] Two Sum`
    pub fn bracketed_status() -> Self {
        Self::new("bracketed-status", &BRACKETED_STATUS_RE)
    }

    /// `Two Sum | Accepted | 52 ms | python3`
    pub fn table_row() -> Self {
        Self::new("table-row", &TABLE_ROW_RE)
    }
}

impl LineMatcher for PatternMatcher {
    fn name(&self) -> &'static str {
        self.id
    }

    fn match_line(&self, line: &str) -> Option<LineMatch> {
        let caps = self.pattern.captures(line)?;
        let status = caps.name("status")?.as_str().parse().ok()?;
        Some(LineMatch {
            name: caps.name("name")?.as_str().to_string(),
            status,
        })
    }
}

/// A recognised problem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub name: String,
    pub status: SubmissionStatus,
    /// Identifier of the matcher that recognised the line.
    pub matcher: &'static str,
}

impl ParsedLine {
    pub fn is_solved(&self) -> bool {
        self.status.is_accepted()
    }

    /// The scheduled form of this entry, with its URL filled in.
    pub fn into_record(self, slugs: &SlugGenerator) -> ProblemRecord {
        let url = slugs.url(&self.name);
        ProblemRecord {
            status: self.status.label().to_string(),
            solved: self.is_solved(),
            name: self.name,
            url,
        }
    }
}

/// Priority-ordered list of matchers.
pub struct LineParser {
    matchers: Vec<Box<dyn LineMatcher>>,
}

impl LineParser {
    /// Parser with the built-in formats, in priority order.
    pub fn new() -> Self {
        Self::empty()
            .with_matcher(PatternMatcher::relative_timestamp())
            .with_matcher(PatternMatcher::truncated_timestamp())
            .with_matcher(PatternMatcher::ordinal_list())
            .with_matcher(PatternMatcher::bracketed_status())
            .with_matcher(PatternMatcher::table_row())
    }

    /// Parser with no matchers.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Append `matcher` at the lowest priority.
    pub fn with_matcher(mut self, matcher: impl LineMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Matcher identifiers in priority order.
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    pub fn parse_line(&self, line: &RawLine<'_>) -> Option<ParsedLine> {
        self.parse_text(line.text)
    }

    /// Recognise a problem entry in `text`, whatever its status.
    pub fn parse_text(&self, text: &str) -> Option<ParsedLine> {
        if text.trim().is_empty() || is_header(text) {
            return None;
        }

        // Only the first matching format is consulted, even if its name is rejected.
        let (matcher, found) = self
            .matchers
            .iter()
            .find_map(|matcher| matcher.match_line(text).map(|found| (matcher, found)))?;

        let name = clean_name(&found.name);
        is_plausible_name(&name).then(|| ParsedLine {
            name,
            status: found.status,
            matcher: matcher.name(),
        })
    }

    /// Accepted entries of `lines`, in input order.
    pub fn solved<'a, I>(&'a self, lines: I) -> impl Iterator<Item = ParsedLine> + 'a
    where
        I: IntoIterator<Item = RawLine<'a>>,
        I::IntoIter: 'a,
    {
        lines
            .into_iter()
            .filter_map(move |line| self.parse_line(&line))
            .filter(ParsedLine::is_solved)
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineParser")
            .field("matchers", &self.matcher_names())
            .finish()
    }
}

/// Table header or page title rather than a submission.
fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.contains("time submitted") {
        return true;
    }
    let column_titles = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| HEADER_WORDS.contains(word))
        .count();
    column_titles >= 2
}

/// Drop runtime and language columns that leaked into the name, and
/// collapse whitespace.
fn clean_name(raw: &str) -> String {
    let without_runtime = TRAILING_RUNTIME_RE.replace(raw, "");
    let without_language = TRAILING_LANGUAGE_RE.replace(&without_runtime, "");
    without_language.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_plausible_name(name: &str) -> bool {
    if name.chars().count() <= 3 {
        return false;
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if name == SubmissionStatus::Accepted.label() {
        return false;
    }
    let lower = name.to_lowercase();
    !NOISE_FRAGMENTS.iter().any(|noise| lower.contains(noise))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<ParsedLine> {
        LineParser::new().parse_text(line)
    }

    #[test]
    fn builtin_order_is_fixed() {
        assert_eq!(
            LineParser::new().matcher_names(),
            vec![
                "relative-timestamp",
                "truncated-timestamp",
                "ordinal-list",
                "bracketed-status",
                "table-row",
            ]
        );
    }

    #[test]
    fn relative_timestamp_format() {
        let parsed = parse("1 year, 3 months ago Two Sum Accepted 52 ms python3").unwrap();
        assert_eq!(parsed.name, "Two Sum");
        assert_eq!(parsed.status, SubmissionStatus::Accepted);
        assert_eq!(parsed.matcher, "relative-timestamp");

        let parsed = parse("1 year ago Valid Parentheses Accepted 40 ms cpp").unwrap();
        assert_eq!(parsed.name, "Valid Parentheses");
        assert_eq!(parsed.matcher, "relative-timestamp");

        let parsed = parse("2 days ago Merge Intervals Wrong Answer N/A python3").unwrap();
        assert_eq!(parsed.status, SubmissionStatus::WrongAnswer);
        assert!(!parsed.is_solved());
    }

    #[test]
    fn truncated_timestamp_format() {
        let parsed = parse("1 year, Group Anagrams Accepted 88 ms python3").unwrap();
        assert_eq!(parsed.name, "Group Anagrams");
        assert_eq!(parsed.matcher, "truncated-timestamp");
    }

    #[test]
    fn ordinal_list_format() {
        let parsed = parse("1. Two Sum Accepted").unwrap();
        assert_eq!(parsed.name, "Two Sum");
        assert_eq!(parsed.matcher, "ordinal-list");

        let parsed = parse("4. 3Sum Closest Wrong Answer").unwrap();
        assert_eq!(parsed.name, "3Sum Closest");
        assert_eq!(parsed.status, SubmissionStatus::WrongAnswer);

        let parsed = parse("12) LRU Cache - Accepted").unwrap();
        assert_eq!(parsed.name, "LRU Cache");

        let parsed = parse("#7: Climbing Stairs Time Limit Exceeded").unwrap();
        assert_eq!(parsed.name, "Climbing Stairs");
        assert_eq!(parsed.status, SubmissionStatus::TimeLimitExceeded);
    }

    #[test]
    fn bracketed_status_format() {
        let parsed = parse("[Accepted] Number of Islands").unwrap();
        assert_eq!(parsed.name, "Number of Islands");
        assert_eq!(parsed.matcher, "bracketed-status");

        let parsed = parse("[Runtime Error] - Word Ladder").unwrap();
        assert_eq!(parsed.name, "Word Ladder");
        assert_eq!(parsed.status, SubmissionStatus::RuntimeError);
    }

    #[test]
    fn table_row_format() {
        let parsed = parse("Two Sum | Accepted | 52 ms | python3").unwrap();
        assert_eq!(parsed.name, "Two Sum");
        assert_eq!(parsed.matcher, "table-row");

        let parsed = parse("| Jump Game\tAccepted\t12 ms").unwrap();
        assert_eq!(parsed.name, "Jump Game");
    }

    #[test]
    fn first_registered_matcher_wins() {
        // Also a valid table row, but the ordinal matcher is tried first.
        let parsed = parse("3. Two Sum | Accepted").unwrap();
        assert_eq!(parsed.matcher, "ordinal-list");
        assert_eq!(parsed.name, "Two Sum");
    }

    #[test]
    fn rejected_name_does_not_fall_through() {
        assert!(PatternMatcher::ordinal_list()
            .match_line("1. Abc\tAccepted")
            .is_some());
        assert!(parse("1. Abc\tAccepted").is_none());
        assert!(parse("1. Abc | Accepted").is_none());
    }

    #[test]
    fn headers_and_noise_never_match() {
        assert!(parse("Time Submitted Question Status Runtime Language").is_none());
        assert!(parse("Question | Status | Runtime").is_none());
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
        assert!(parse("Page 3 of 12").is_none());
        // Too short, numeric, or table noise.
        assert!(parse("1. Abc Accepted").is_none());
        assert!(parse("1. 12345 Accepted").is_none());
        assert!(parse("1 year ago N/A entry Accepted 3 ms").is_none());
    }

    #[test]
    fn clean_name_strips_trailing_columns() {
        assert_eq!(clean_name("Two Sum 52 ms python3"), "Two Sum");
        assert_eq!(clean_name("Two  Sum  python3 extra"), "Two Sum");
        assert_eq!(clean_name(" Valid   Parentheses "), "Valid Parentheses");
    }

    #[test]
    fn solved_filters_out_other_statuses() {
        let doc = crate::extract::ExtractedDocument::from_text(
            "july.txt",
            "July".into(),
            "1. Two Sum Accepted\n2. Two Sum Accepted\n3. Valid Parentheses Accepted\n4. 3Sum Closest Wrong Answer",
        );
        let parser = LineParser::new();
        let names: Vec<_> = parser.solved(doc.lines()).map(|p| p.name).collect();
        assert_eq!(names, vec!["Two Sum", "Two Sum", "Valid Parentheses"]);
    }

    struct ColonMatcher;

    impl LineMatcher for ColonMatcher {
        fn name(&self) -> &'static str {
            "colon"
        }

        fn match_line(&self, line: &str) -> Option<LineMatch> {
            let (name, status) = line.split_once(" :: ")?;
            Some(LineMatch {
                name: name.to_string(),
                status: status.parse().ok()?,
            })
        }
    }

    #[test]
    fn appended_matcher_extends_formats() {
        let parser = LineParser::new().with_matcher(ColonMatcher);
        assert_eq!(parser.matcher_names().last(), Some(&"colon"));

        let parsed = parser.parse_text("House Robber :: Accepted").unwrap();
        assert_eq!(parsed.name, "House Robber");
        assert_eq!(parsed.matcher, "colon");
        assert!(LineParser::new().parse_text("House Robber :: Accepted").is_none());
    }

    #[test]
    fn into_record_fills_url() {
        let parsed = parse("1. Two Sum Accepted").unwrap();
        let record = parsed.into_record(&SlugGenerator::default());
        assert_eq!(record.url, "https://leetcode.com/problems/two-sum");
        assert!(record.solved);
        assert_eq!(record.status, "Accepted");
    }
}
