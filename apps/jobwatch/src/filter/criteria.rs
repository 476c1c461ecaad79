use thiserror::Error;

/// User-chosen acceptance thresholds. Immutable for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub minimum_match_count: u32,
    pub require_remote: bool,
    pub require_international_or_ngo: bool,
    /// At least one resume role keyword must appear in the posting.
    pub require_role_match: bool,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            minimum_match_count: 2,
            require_remote: true,
            require_international_or_ngo: true,
            require_role_match: false,
        }
    }
}

/// Why a posting was filtered out. The first failing rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("only {found} keyword matches, {required} required")]
    InsufficientMatches { found: u32, required: u32 },

    #[error("not remote")]
    NotRemote,

    #[error("neither international nor NGO")]
    NotInternationalOrNgo,

    #[error("no resume role mentioned")]
    NoRoleMatch,
}

/// The facts about a posting the acceptance rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub match_count: u32,
    pub is_remote: bool,
    pub is_international: bool,
    pub is_ngo: bool,
    pub role_match: bool,
}

impl MatchCriteria {
    pub fn check(&self, signals: &Signals) -> Result<(), Rejection> {
        if signals.match_count < self.minimum_match_count {
            return Err(Rejection::InsufficientMatches {
                found: signals.match_count,
                required: self.minimum_match_count,
            });
        }
        if self.require_remote && !signals.is_remote {
            return Err(Rejection::NotRemote);
        }
        if self.require_international_or_ngo && !(signals.is_international || signals.is_ngo) {
            return Err(Rejection::NotInternationalOrNgo);
        }
        if self.require_role_match && !signals.role_match {
            return Err(Rejection::NoRoleMatch);
        }
        Ok(())
    }
}

/// Orders the digest: keyword matches, plus 2 for an NGO and 1 for an international employer.
pub fn relevance_score(signals: &Signals) -> u32 {
    signals.match_count + 2 * u32::from(signals.is_ngo) + u32::from(signals.is_international)
}
