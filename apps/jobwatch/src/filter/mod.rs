//! Posting normalizer & filter: a pure function from a canonical posting,
//! the resume profile and the match criteria to an accepted `Posting` or a
//! `Rejection`. No I/O, no randomness.

pub mod criteria;
pub mod markers;
pub mod matching;
pub mod normalizer;

pub use criteria::{MatchCriteria, Rejection};
pub use normalizer::normalize;

use crate::models::posting::{Posting, PostingInput};
use crate::resume::ResumeProfile;

use criteria::{relevance_score, Signals};

pub fn evaluate(
    input: PostingInput,
    profile: &ResumeProfile,
    criteria: &MatchCriteria,
) -> Result<Posting, Rejection> {
    let matched = matching::matched_keywords(profile, &input.title, &input.description);
    let signals = Signals {
        match_count: u32::try_from(matched.len()).unwrap_or(u32::MAX),
        is_remote: markers::is_remote(&input.location, &input.description),
        is_international: markers::is_international(&input.company, &input.description),
        is_ngo: markers::is_ngo(&input.company, &input.description),
        role_match: matching::has_role_match(profile, &matched),
    };

    criteria.check(&signals)?;

    Ok(Posting {
        source_name: input.source,
        source_id: input.source_id,
        title: input.title,
        company: input.company,
        location: input.location,
        description: input.description,
        url: input.url,
        date_posted: input.date_posted,
        is_remote: signals.is_remote,
        is_international: signals.is_international,
        is_ngo: signals.is_ngo,
        matched_keywords: matched,
        match_count: signals.match_count,
        relevance_score: relevance_score(&signals),
    })
}
