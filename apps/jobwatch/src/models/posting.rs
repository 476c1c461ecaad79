use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

/// The job boards postings are scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceName {
    UnJobs,
    UnCareers,
    Wellfound,
}

impl SourceName {
    pub const ALL: [SourceName; 3] = [
        SourceName::UnJobs,
        SourceName::UnCareers,
        SourceName::Wellfound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::UnJobs => "unjobs",
            SourceName::UnCareers => "un_careers",
            SourceName::Wellfound => "wellfound",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown source '{s}'"))
    }
}

/// A posting exactly as a source adapter scraped it. Any field may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPosting {
    pub source: SourceName,
    /// Stable identifier within the source, usually the listing URL.
    pub source_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Link reported to the user. Falls back to `source_id` when absent.
    pub url: Option<String>,
    pub date_posted: Option<NaiveDate>,
}

impl RawPosting {
    pub fn new(source: SourceName) -> Self {
        Self {
            source,
            source_id: None,
            title: None,
            company: None,
            location: None,
            description: None,
            url: None,
            date_posted: None,
        }
    }
}

/// Canonical record produced by the normalizer. Title, description and
/// identifier are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingInput {
    pub source: SourceName,
    pub source_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub date_posted: NaiveDate,
}

/// A posting that passed the filter and is ready to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub source_name: SourceName,
    pub source_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub date_posted: NaiveDate,
    pub is_remote: bool,
    pub is_international: bool,
    pub is_ngo: bool,
    pub matched_keywords: BTreeSet<String>,
    pub match_count: u32,
    pub relevance_score: u32,
}

/// A posting as recorded in the dedup store.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenPosting {
    pub id: i64,
    pub posting: Posting,
    pub first_seen_at: DateTime<Utc>,
}
