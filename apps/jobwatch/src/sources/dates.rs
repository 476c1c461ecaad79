//! Posting-date parsing for the formats the boards print.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

static DAYS_AGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s+days?\s+ago").expect("valid days-ago regex"));
// Leading "24 July 2023" of a "24 July 2023 - 23 August 2023" range.
static RANGE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}\s+[A-Za-z]+\s+\d{4})").expect("valid range regex"));

/// Parses "3 days ago", "today", "yesterday", "July 24, 2023", "24 July 2023"
/// and date ranges starting with the latter. `None` when nothing matches.
pub fn parse_posted_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.trim();
    let lower = text.to_lowercase();

    if lower == "today" || lower == "just posted" {
        return Some(today);
    }
    if lower == "yesterday" {
        return today.checked_sub_days(Days::new(1));
    }

    if let Some(caps) = DAYS_AGO_RE.captures(text) {
        let days: u64 = caps[1].parse().ok()?;
        return today.checked_sub_days(Days::new(days));
    }

    if let Ok(date) = NaiveDate::parse_from_str(&text.replace(',', ""), "%B %d %Y") {
        return Some(date);
    }

    let start = RANGE_START_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| text.to_string());
    NaiveDate::parse_from_str(&start, "%d %B %Y").ok()
}
