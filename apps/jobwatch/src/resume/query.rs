use crate::models::posting::SourceName;
use crate::resume::ResumeProfile;

const UNJOBS_EXTRA_TERMS: &[&str] = &["remote", "ngo", "united nations"];

/// Builds the free-text search query a board is queried with.
///
/// careers.un.org is browsed through a fixed IT filter and takes no query.
/// Wellfound's query is form-encoded by the adapter, so spaces become `+`.
pub fn search_query(profile: &ResumeProfile, source: SourceName) -> Option<String> {
    let terms = profile.roles().iter().chain(profile.skills().iter()).map(String::as_str);

    match source {
        SourceName::UnJobs => Some(
            terms
                .chain(UNJOBS_EXTRA_TERMS.iter().copied())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        SourceName::Wellfound => Some(terms.chain(["remote"]).collect::<Vec<_>>().join(" ")),
        SourceName::UnCareers => None,
    }
}
