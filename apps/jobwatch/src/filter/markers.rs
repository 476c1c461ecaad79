//! Marker-phrase heuristics for remote, international and NGO postings.
//!
//! A marker matches case-insensitively where a word starts, so "ngo" fires on
//! "NGO work" and "NGOs" but not on "Django" or "MongoDB", and "remote" fires
//! on "remotely".

use std::sync::LazyLock;

use regex::Regex;

pub const REMOTE_MARKERS: &[&str] = &[
    "remote",
    "work from home",
    "worldwide",
    "home office",
    "anywhere",
    "telecommute",
];

pub const INTERNATIONAL_MARKERS: &[&str] = &["international", "global", "worldwide", "multinational"];

pub const NGO_MARKERS: &[&str] = &[
    "ngo",
    "non-profit",
    "nonprofit",
    "foundation",
    "charity",
    "united nations",
    "wfp",
    "unicef",
    "humanitarian",
];

static REMOTE_RE: LazyLock<Regex> = LazyLock::new(|| marker_regex(REMOTE_MARKERS));
static INTERNATIONAL_RE: LazyLock<Regex> = LazyLock::new(|| marker_regex(INTERNATIONAL_MARKERS));
static NGO_RE: LazyLock<Regex> = LazyLock::new(|| marker_regex(NGO_MARKERS));

fn marker_regex(markers: &[&str]) -> Regex {
    let alternatives: Vec<String> = markers
        .iter()
        .map(|m| regex::escape(m).replace(' ', r"\s+"))
        .collect();
    // Markers are escaped literals, so the pattern is always valid.
    Regex::new(&format!(r"(?i)\b(?:{})", alternatives.join("|"))).expect("valid marker regex")
}

/// Remote iff a remote marker appears in the location or description.
pub fn is_remote(location: &str, description: &str) -> bool {
    REMOTE_RE.is_match(location) || REMOTE_RE.is_match(description)
}

pub fn is_international(company: &str, description: &str) -> bool {
    INTERNATIONAL_RE.is_match(company) || INTERNATIONAL_RE.is_match(description)
}

pub fn is_ngo(company: &str, description: &str) -> bool {
    NGO_RE.is_match(company) || NGO_RE.is_match(description)
}
