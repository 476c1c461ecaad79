//! Resume keyword extraction. Reads the resume once per run and yields the
//! read-only `ResumeProfile` the filter scores postings against.

pub mod parser;
pub mod query;

pub use parser::{load_profile, KeywordVocabulary, ResumeError};

use std::collections::BTreeSet;

/// Normalized (trimmed, lowercased) skill and role keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeProfile {
    skills: BTreeSet<String>,
    roles: BTreeSet<String>,
}

impl ResumeProfile {
    pub fn new<S, R>(skills: S, roles: R) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            skills: normalize_all(skills),
            roles: normalize_all(roles),
        }
    }

    /// A profile of plain keywords with no role distinction.
    #[cfg(test)]
    pub fn from_keywords<K>(keywords: K) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self::new(keywords, std::iter::empty::<&str>())
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Skills then roles. A keyword listed as both appears once.
    pub fn keywords(&self) -> BTreeSet<&str> {
        self.skills
            .iter()
            .chain(self.roles.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.roles.is_empty()
    }
}

fn normalize_all<I>(items: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_normalized() {
        let profile = ResumeProfile::new(["  Python ", "AWS", ""], ["Software Engineer"]);
        assert!(profile.skills().contains("python"));
        assert!(profile.skills().contains("aws"));
        assert_eq!(profile.skills().len(), 2);
        assert!(profile.roles().contains("software engineer"));
    }

    #[test]
    fn test_keywords_merges_skills_and_roles() {
        let profile = ResumeProfile::new(["cloud"], ["cloud", "devops engineer"]);
        let keywords = profile.keywords();
        assert_eq!(keywords.len(), 2);
        assert!(keywords.contains("devops engineer"));
    }

    #[test]
    fn test_empty_profile() {
        assert!(ResumeProfile::default().is_empty());
        assert!(!ResumeProfile::from_keywords(["rust"]).is_empty());
    }
}
