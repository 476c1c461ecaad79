//! Exact, case-insensitive keyword matching over word tokens.
//!
//! Text is lowercased and split on anything that is not alphanumeric or one of
//! `+ # .`, so `c++`, `c#` and `node.js` survive as single tokens while
//! `ci/cd` and `non-profit` split in two. Keywords go through the same
//! tokenizer and match when their token sequence appears contiguously.

use std::collections::BTreeSet;

use crate::resume::ResumeProfile;

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|token| token.trim_matches('.'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when `phrase` occurs as a contiguous run in `tokens`. An empty phrase never matches.
pub fn contains_phrase(tokens: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && tokens.windows(phrase.len()).any(|window| window == phrase)
}

/// Profile keywords (skills and roles) found in the title or description.
pub fn matched_keywords(profile: &ResumeProfile, title: &str, description: &str) -> BTreeSet<String> {
    let mut tokens = tokenize(title);
    // Separator so a phrase cannot straddle title and description.
    tokens.push("|".to_string());
    tokens.extend(tokenize(description));

    profile
        .keywords()
        .into_iter()
        .filter(|keyword| contains_phrase(&tokens, &tokenize(keyword)))
        .map(str::to_string)
        .collect()
}

/// Whether any of the profile's role keywords appear.
pub fn has_role_match(profile: &ResumeProfile, matched: &BTreeSet<String>) -> bool {
    profile.roles().iter().any(|role| matched.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Senior Python/Django Dev, REST-API."),
            vec!["senior", "python", "django", "dev", "rest", "api"]
        );
    }

    #[test]
    fn test_tokenize_keeps_language_names() {
        assert_eq!(tokenize("C++, C# and Node.js"), vec!["c++", "c#", "and", "node.js"]);
    }

    #[test]
    fn test_contains_phrase() {
        let tokens = tokenize("we build rest api services");
        assert!(contains_phrase(&tokens, &tokenize("REST API")));
        assert!(!contains_phrase(&tokens, &tokenize("api rest")));
        assert!(!contains_phrase(&tokens, &[]));
    }

    #[test]
    fn test_matched_keywords_is_exact_not_substring() {
        let profile = ResumeProfile::from_keywords(["go", "sql"]);
        let matched = matched_keywords(&profile, "Django developer", "MySQL and MongoDB");
        assert!(matched.is_empty());
    }

    #[test]
    fn test_matched_keywords_spans_title_and_description() {
        let profile = ResumeProfile::new(["python", "docker"], ["backend developer"]);
        let matched = matched_keywords(&profile, "Backend Developer", "Python, Kubernetes");
        assert_eq!(
            matched.into_iter().collect::<Vec<_>>(),
            vec!["backend developer", "python"]
        );
    }

    #[test]
    fn test_phrase_cannot_straddle_title_and_description() {
        let profile = ResumeProfile::from_keywords(["software engineer"]);
        let matched = matched_keywords(&profile, "Senior Software", "Engineer wanted");
        assert!(matched.is_empty());
    }

    #[test]
    fn test_has_role_match() {
        let profile = ResumeProfile::new(["python"], ["devops engineer"]);
        let with_role = matched_keywords(&profile, "DevOps Engineer", "python");
        let without_role = matched_keywords(&profile, "Data Analyst", "python");
        assert!(has_role_match(&profile, &with_role));
        assert!(!has_role_match(&profile, &without_role));
    }
}
