use serde::{Deserialize, Serialize};

use crate::model::record::Candidate;

/// The distinct parties fielding candidates in an election.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartyBreakdown {
    /// Number of distinct parties.
    pub count: usize,
    /// Distinct parties, in the order they were first seen.
    pub parties: Vec<String>,
}

impl PartyBreakdown {
    /// Count the distinct parties across the given candidates.
    /// Party names are matched exactly, without any normalisation.
    pub fn of<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> Self {
        let mut parties: Vec<String> = Vec::new();
        for candidate in candidates {
            if !parties.contains(&candidate.party) {
                parties.push(candidate.party.clone());
            }
        }
        Self {
            count: parties.len(),
            parties,
        }
    }
}
