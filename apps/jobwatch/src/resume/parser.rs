use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::filter::matching::{contains_phrase, tokenize};
use crate::resume::ResumeProfile;

const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "django",
    "flask",
    "aws",
    "docker",
    "kubernetes",
    "sql",
    "rest api",
    "microservices",
    "git",
    "linux",
    "cloud",
    "api design",
];

const DEFAULT_ROLES: &[&str] = &[
    "software engineer",
    "backend developer",
    "software developer",
    "devops engineer",
    "cloud engineer",
];

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Resume file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read resume {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("No known skill or role keywords found in resume {0}")]
    NoKeywords(PathBuf),
}

/// The skills and roles a resume is searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordVocabulary {
    pub skills: Vec<String>,
    pub roles: Vec<String>,
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            roles: DEFAULT_ROLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Reads the resume at `path`: PDFs through `pdf-extract`, anything else as UTF-8 text.
pub fn extract_text(path: &Path) -> Result<String, ResumeError> {
    if !path.exists() {
        return Err(ResumeError::NotFound(path.to_path_buf()));
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        pdf_extract::extract_text(path).map_err(|e| ResumeError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    } else {
        std::fs::read_to_string(path).map_err(|source| ResumeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Keeps every vocabulary skill and role that appears in the text as a whole
/// word or phrase.
pub fn extract_profile(text: &str, vocabulary: &KeywordVocabulary) -> ResumeProfile {
    let tokens = tokenize(text);
    let present = |keyword: &&String| contains_phrase(&tokens, &tokenize(keyword));

    ResumeProfile::new(
        vocabulary.skills.iter().filter(present),
        vocabulary.roles.iter().filter(present),
    )
}

/// Reads the resume and extracts its profile. An empty profile is an error:
/// nothing could ever match it.
pub fn load_profile(path: &Path, vocabulary: &KeywordVocabulary) -> Result<ResumeProfile, ResumeError> {
    let text = extract_text(path)?;
    if text.trim().is_empty() {
        warn!("Resume {} contains no extractable text", path.display());
    }

    let profile = extract_profile(&text, vocabulary);
    if profile.is_empty() {
        return Err(ResumeError::NoKeywords(path.to_path_buf()));
    }

    info!(
        skills = ?profile.skills(),
        roles = ?profile.roles(),
        "Resume keywords extracted"
    );
    Ok(profile)
}
