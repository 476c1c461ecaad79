use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::filter::MatchCriteria;
use crate::models::posting::SourceName;
use crate::resume::KeywordVocabulary;

/// Application configuration loaded from environment variables.
/// Built once at startup and passed by reference; nothing else reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_path: PathBuf,
    pub db_path: PathBuf,
    pub criteria: MatchCriteria,
    pub scraping_delay: Duration,
    pub sources: SourceToggles,
    pub vocabulary: KeywordVocabulary,
    /// `None` when sender, password or recipient is missing.
    pub mail: Option<MailConfig>,
    pub rust_log: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceToggles {
    pub unjobs: bool,
    pub un_careers: bool,
    pub wellfound: bool,
}

impl SourceToggles {
    pub fn is_enabled(&self, source: SourceName) -> bool {
        match source {
            SourceName::UnJobs => self.unjobs,
            SourceName::UnCareers => self.un_careers,
            SourceName::Wellfound => self.wellfound,
        }
    }
}

impl Default for SourceToggles {
    fn default() -> Self {
        Self {
            unjobs: true,
            un_careers: true,
            wellfound: true,
        }
    }
}

#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub password: String,
    pub recipient: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

// Keeps the password out of logs.
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = MatchCriteria::default();
        let criteria = MatchCriteria {
            minimum_match_count: parse_or(&get, "MIN_SKILL_MATCHES", defaults.minimum_match_count)?,
            require_remote: flag_or(&get, "REQUIRE_REMOTE", defaults.require_remote)?,
            require_international_or_ngo: flag_or(
                &get,
                "REQUIRE_INTERNATIONAL_OR_NGO",
                defaults.require_international_or_ngo,
            )?,
            require_role_match: flag_or(&get, "REQUIRE_ROLE_MATCH", defaults.require_role_match)?,
        };

        let vocabulary_defaults = KeywordVocabulary::default();
        let vocabulary = KeywordVocabulary {
            skills: get("SKILL_KEYWORDS")
                .map(|v| split_list(&v))
                .unwrap_or(vocabulary_defaults.skills),
            roles: get("ROLE_KEYWORDS")
                .map(|v| split_list(&v))
                .unwrap_or(vocabulary_defaults.roles),
        };

        let mail = match (
            get("JOB_SEARCH_EMAIL_SENDER"),
            get("JOB_SEARCH_EMAIL_PASSWORD"),
            get("JOB_SEARCH_EMAIL_RECIPIENT"),
        ) {
            (Some(sender), Some(password), Some(recipient)) => Some(MailConfig {
                sender,
                password,
                recipient,
                smtp_server: get("JOB_SEARCH_SMTP_SERVER")
                    .unwrap_or_else(|| "smtp.gmail.com".to_string()),
                smtp_port: parse_or(&get, "JOB_SEARCH_SMTP_PORT", 465)?,
            }),
            _ => None,
        };

        Ok(Config {
            resume_path: PathBuf::from(
                get("RESUME_PATH")
                    .context("Required environment variable 'RESUME_PATH' is not set")?,
            ),
            db_path: PathBuf::from(get("DB_PATH").unwrap_or_else(|| "jobs.db".to_string())),
            criteria,
            scraping_delay: Duration::from_secs(parse_or(&get, "SCRAPING_DELAY_SECONDS", 1)?),
            sources: SourceToggles {
                unjobs: flag_or(&get, "ENABLE_UNJOBS", true)?,
                un_careers: flag_or(&get, "ENABLE_UN_CAREERS", true)?,
                wellfound: flag_or(&get, "ENABLE_WELLFOUND", true)?,
            },
            vocabulary,
            mail,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn flag_or<G>(get: &G, key: &str, default: bool) -> Result<bool>
where
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("Environment variable '{key}' must be a boolean, got '{raw}'"),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_resume_path_is_an_error() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("RESUME_PATH"));
    }

    #[test]
    fn test_defaults_apply() {
        let config = config_from(&[("RESUME_PATH", "cv.pdf")]).unwrap();
        assert_eq!(config.resume_path, PathBuf::from("cv.pdf"));
        assert_eq!(config.db_path, PathBuf::from("jobs.db"));
        assert_eq!(config.criteria, MatchCriteria::default());
        assert_eq!(config.scraping_delay, Duration::from_secs(1));
        assert_eq!(config.sources, SourceToggles::default());
        assert!(config.mail.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_criteria_overrides() {
        let config = config_from(&[
            ("RESUME_PATH", "cv.pdf"),
            ("MIN_SKILL_MATCHES", "4"),
            ("REQUIRE_REMOTE", "false"),
            ("REQUIRE_ROLE_MATCH", "yes"),
        ])
        .unwrap();
        assert_eq!(config.criteria.minimum_match_count, 4);
        assert!(!config.criteria.require_remote);
        assert!(config.criteria.require_international_or_ngo);
        assert!(config.criteria.require_role_match);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config_from(&[("RESUME_PATH", "cv.pdf"), ("MIN_SKILL_MATCHES", "two")])
            .unwrap_err();
        assert!(err.to_string().contains("MIN_SKILL_MATCHES"));
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        let err =
            config_from(&[("RESUME_PATH", "cv.pdf"), ("ENABLE_WELLFOUND", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("ENABLE_WELLFOUND"));
    }

    #[test]
    fn test_mail_requires_all_three_credentials() {
        let partial = config_from(&[
            ("RESUME_PATH", "cv.pdf"),
            ("JOB_SEARCH_EMAIL_SENDER", "me@example.com"),
            ("JOB_SEARCH_EMAIL_PASSWORD", "secret"),
        ])
        .unwrap();
        assert!(partial.mail.is_none());

        let full = config_from(&[
            ("RESUME_PATH", "cv.pdf"),
            ("JOB_SEARCH_EMAIL_SENDER", "me@example.com"),
            ("JOB_SEARCH_EMAIL_PASSWORD", "secret"),
            ("JOB_SEARCH_EMAIL_RECIPIENT", "me@example.com"),
            ("JOB_SEARCH_SMTP_PORT", "587"),
        ])
        .unwrap();
        let mail = full.mail.unwrap();
        assert_eq!(mail.smtp_server, "smtp.gmail.com");
        assert_eq!(mail.smtp_port, 587);
        assert!(!format!("{mail:?}").contains("secret"));
    }

    #[test]
    fn test_keyword_lists_are_split_and_lowercased() {
        let config = config_from(&[
            ("RESUME_PATH", "cv.pdf"),
            ("SKILL_KEYWORDS", "Rust, Tokio ,,SQL"),
        ])
        .unwrap();
        assert_eq!(config.vocabulary.skills, vec!["rust", "tokio", "sql"]);
        assert_eq!(config.vocabulary.roles, KeywordVocabulary::default().roles);
    }

    #[test]
    fn test_source_toggles() {
        let config = config_from(&[("RESUME_PATH", "cv.pdf"), ("ENABLE_UN_CAREERS", "0")]).unwrap();
        assert!(config.sources.is_enabled(SourceName::UnJobs));
        assert!(!config.sources.is_enabled(SourceName::UnCareers));
        assert!(config.sources.is_enabled(SourceName::Wellfound));
    }
}
