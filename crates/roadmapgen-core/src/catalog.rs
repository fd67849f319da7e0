//! Flat problem catalog across every track's artifact.
//!
//! Difficulty, topics and time are estimated from the problem name alone.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SerializationError;
use crate::model::RoadmapArtifact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Estimated solving time.
    pub fn minutes(&self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 30,
            Difficulty::Hard => 45,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// How a keyword is looked for in a lowercased problem name.
#[derive(Debug, Clone, Copy)]
enum Keyword {
    /// Anywhere in the name.
    Part(&'static str),
    /// As a whole word only, so `or` does not hit "Word".
    Word(&'static str),
}

use Keyword::{Part, Word};

impl Keyword {
    fn found_in(&self, name: &str) -> bool {
        match self {
            Part(k) => name.contains(k),
            Word(k) => name
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == *k),
        }
    }
}

const EASY_KEYWORDS: &[Keyword] = &[
    Part("two sum"),
    Part("valid"),
    Part("merge"),
    Part("reverse"),
    Part("palindrome"),
    Part("anagram"),
    Part("binary search"),
];

const HARD_KEYWORDS: &[Keyword] = &[
    Part("median"),
    Part("serialize"),
    Part("sliding window"),
    Part("minimum window"),
    Part("trapping"),
    Part("word ladder"),
];

const TOPICS: &[(&str, &[Keyword])] = &[
    (
        "Array",
        &[Part("array"), Part("sum"), Part("product"), Part("subarray"), Part("rotate")],
    ),
    (
        "String",
        &[Part("string"), Part("palindrome"), Part("anagram"), Part("word"), Part("character")],
    ),
    (
        "Binary Tree",
        &[Part("tree"), Word("bst"), Part("node")],
    ),
    (
        "Linked List",
        &[Part("linked list"), Part("list cycle"), Part("merge")],
    ),
    (
        "Graph",
        &[Part("graph"), Word("dfs"), Word("bfs"), Part("island"), Part("clone")],
    ),
    (
        "Dynamic Programming",
        &[Part("dynamic programming"), Word("dp"), Part("coin"), Part("climb"), Part("house robber")],
    ),
    (
        "Binary Search",
        &[Part("binary search"), Part("search"), Part("find")],
    ),
    (
        "Stack",
        &[Part("stack"), Part("queue"), Part("parentheses"), Part("calculator")],
    ),
    (
        "Heap",
        &[Part("heap"), Part("priority"), Word("kth"), Part("median")],
    ),
    ("Hash Table", &[Part("hash"), Word("map"), Word("set")]),
    ("Sorting", &[Part("sort"), Part("merge")]),
    ("Matrix", &[Part("matrix"), Part("grid"), Word("2d")]),
    (
        "Backtracking",
        &[Part("backtrack"), Part("permutation"), Part("combination")],
    ),
    ("Trie", &[Part("trie"), Part("prefix")]),
    (
        "Bit Manipulation",
        &[Part("bit"), Word("xor"), Word("and"), Word("or")],
    ),
];

const FALLBACK_TOPIC: &str = "Algorithm";

/// Heuristic difficulty, topics and time for a problem name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub time_minutes: u32,
}

pub fn estimate(name: &str) -> Estimate {
    let lower = name.to_lowercase();
    let any = |keywords: &[Keyword]| keywords.iter().any(|k| k.found_in(&lower));

    let difficulty = if any(EASY_KEYWORDS) {
        Difficulty::Easy
    } else if any(HARD_KEYWORDS) {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    };

    let mut topics: Vec<String> = TOPICS
        .iter()
        .filter(|(_, keywords)| any(keywords))
        .map(|(topic, _)| topic.to_string())
        .collect();
    if topics.is_empty() {
        topics.push(FALLBACK_TOPIC.to_string());
    }

    Estimate {
        difficulty,
        topics,
        time_minutes: difficulty.minutes(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 1-based position in the catalog.
    pub id: usize,
    pub title: String,
    pub url: String,
    pub difficulty: Difficulty,
    #[serde(rename = "time")]
    pub time_minutes: u32,
    pub topics: Vec<String>,
    /// `"<track>-<display month>"` of the first occurrence.
    pub source: String,
}

/// Every scheduled problem once, in track then month then day order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemCatalog {
    entries: Vec<CatalogEntry>,
}

impl ProblemCatalog {
    /// Flatten `(track name, artifact)` pairs. Problems are de-duplicated
    /// by URL; the first occurrence is kept.
    pub fn from_artifacts<'a, I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a RoadmapArtifact)>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (track, artifact) in tracks {
            for (month, days) in artifact.months() {
                for problem in days.iter().flat_map(|d| d.problems()) {
                    if problem.url.is_empty() || !seen.insert(problem.url.clone()) {
                        continue;
                    }
                    let Estimate {
                        difficulty,
                        topics,
                        time_minutes,
                    } = estimate(&problem.name);
                    entries.push(CatalogEntry {
                        id: entries.len() + 1,
                        title: problem.name.clone(),
                        url: problem.url.clone(),
                        difficulty,
                        time_minutes,
                        topics,
                        source: format!("{track}-{month}"),
                    });
                }
            }
        }

        tracing::debug!(problems = entries.len(), "catalog built");
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .count()
    }

    pub fn to_json_string(&self) -> Result<String, SerializationError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
