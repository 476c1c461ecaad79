use chrono::NaiveDate;
use thiserror::Error;

use crate::models::posting::{PostingInput, RawPosting};

/// Boards print these in place of a missing field.
const PLACEHOLDERS: &[&str] = &["n/a", "na", "-", "none", "null"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPosting {
    #[error("missing title")]
    MissingTitle,

    #[error("missing description")]
    MissingDescription,

    #[error("missing stable identifier")]
    MissingIdentifier,
}

/// Converts a scraped posting into the canonical record.
///
/// Title, description and identifier are required. Company and location
/// default to empty, the link to the identifier, the posting date to `today`.
pub fn normalize(raw: RawPosting, today: NaiveDate) -> Result<PostingInput, MalformedPosting> {
    let title = clean(raw.title).ok_or(MalformedPosting::MissingTitle)?;
    let description = clean(raw.description).ok_or(MalformedPosting::MissingDescription)?;
    let source_id = clean(raw.source_id).ok_or(MalformedPosting::MissingIdentifier)?;
    let url = clean(raw.url).unwrap_or_else(|| source_id.clone());

    Ok(PostingInput {
        source: raw.source,
        source_id,
        title,
        company: clean(raw.company).unwrap_or_default(),
        location: clean(raw.location).unwrap_or_default(),
        description,
        url,
        date_posted: raw.date_posted.unwrap_or(today),
    })
}

/// Collapses whitespace and drops blank or placeholder values.
fn clean(value: Option<String>) -> Option<String> {
    let collapsed = value?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || PLACEHOLDERS.contains(&collapsed.to_lowercase().as_str()) {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::SourceName;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn raw() -> RawPosting {
        RawPosting {
            source_id: Some("https://unjobs.org/vacancies/42".to_string()),
            title: Some("  Software   Engineer ".to_string()),
            company: Some("UNICEF".to_string()),
            location: Some("N/A".to_string()),
            description: Some("Python\nremote".to_string()),
            ..RawPosting::new(SourceName::UnJobs)
        }
    }

    #[test]
    fn test_normalize_cleans_fields_and_fills_defaults() {
        let input = normalize(raw(), today()).unwrap();
        assert_eq!(input.title, "Software Engineer");
        assert_eq!(input.description, "Python remote");
        assert_eq!(input.location, "");
        assert_eq!(input.url, "https://unjobs.org/vacancies/42");
        assert_eq!(input.date_posted, today());
    }

    #[test]
    fn test_explicit_url_and_date_are_kept() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let input = normalize(
            RawPosting {
                url: Some("https://apply.example.org/1".to_string()),
                date_posted: Some(date),
                ..raw()
            },
            today(),
        )
        .unwrap();
        assert_eq!(input.url, "https://apply.example.org/1");
        assert_eq!(input.date_posted, date);
    }

    #[test]
    fn test_empty_title_and_description_is_malformed() {
        let result = normalize(
            RawPosting {
                title: Some(String::new()),
                description: Some("   ".to_string()),
                ..raw()
            },
            today(),
        );
        assert_eq!(result, Err(MalformedPosting::MissingTitle));
    }

    #[test]
    fn test_placeholder_description_is_malformed() {
        let result = normalize(
            RawPosting {
                description: Some("n/a".to_string()),
                ..raw()
            },
            today(),
        );
        assert_eq!(result, Err(MalformedPosting::MissingDescription));
    }

    #[test]
    fn test_missing_identifier_is_malformed() {
        let result = normalize(
            RawPosting {
                source_id: None,
                ..raw()
            },
            today(),
        );
        assert_eq!(result, Err(MalformedPosting::MissingIdentifier));
    }
}
