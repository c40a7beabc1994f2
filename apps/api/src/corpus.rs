//! Candidate corpus — the bounded, filtered, deduplicated set of job
//! postings held in memory for matching.
//!
//! Loaded once at startup and read-only afterwards. A dataset that cannot
//! be read degrades to an empty working set with a warning rather than
//! failing the process; matching against an empty set returns no results.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Maximum number of postings kept in the working set.
pub const WORKING_SET_CAP: usize = 20;

/// Titles must contain one of these (case-insensitive) to be kept.
const TITLE_KEYWORDS: [&str; 3] = ["engineer", "developer", "data"];

/// A single job posting. Identity is its position in the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub title: String,
    pub description: String,
}

/// Ordered sequence of postings in source order after filtering.
#[derive(Debug, Default)]
pub struct WorkingSet {
    postings: Vec<Posting>,
}

impl WorkingSet {
    pub fn from_postings(postings: Vec<Posting>) -> Self {
        Self { postings }
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Result of the one-shot corpus load. `warning` is set when the dataset
/// could not be read at all, in which case the working set is empty.
#[derive(Debug)]
pub struct CorpusLoad {
    pub working_set: WorkingSet,
    pub warning: Option<String>,
}

/// Raw CSV row. Extra columns in the dataset are ignored; empty fields
/// deserialize as `None`.
#[derive(Debug, Deserialize)]
struct RawPosting {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "JobDescription")]
    description: Option<String>,
}

/// Loads the working set from the postings CSV at `path`.
///
/// Rows missing a title or description are dropped, titles are filtered
/// against the role keywords, exact duplicate (title, description) pairs
/// are removed, and the result is capped at [`WORKING_SET_CAP`] postings in
/// source order. An unreadable or unparseable file yields an empty working
/// set and a warning, never an error.
pub fn load_postings(path: impl AsRef<Path>) -> CorpusLoad {
    match read_postings(path.as_ref()) {
        Ok(working_set) => CorpusLoad {
            working_set,
            warning: None,
        },
        Err(e) => CorpusLoad {
            working_set: WorkingSet::default(),
            warning: Some(format!("{e:#}")),
        },
    }
}

fn read_postings(path: &Path) -> Result<WorkingSet> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut postings = Vec::new();

    for record in reader.deserialize::<RawPosting>() {
        // A single malformed row is skipped, not fatal.
        let Ok(raw) = record else { continue };
        let (Some(title), Some(description)) = (raw.title, raw.description) else {
            continue;
        };
        if title.trim().is_empty() || description.trim().is_empty() {
            continue;
        }
        if !title_matches(&title) {
            continue;
        }
        if !seen.insert((title.clone(), description.clone())) {
            continue;
        }
        postings.push(Posting { title, description });
        if postings.len() == WORKING_SET_CAP {
            break;
        }
    }

    Ok(WorkingSet { postings })
}

fn title_matches(title: &str) -> bool {
    let lower = title.to_lowercase();
    TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
