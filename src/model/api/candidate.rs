use serde::{Deserialize, Serialize};

use crate::model::{common::CandidateIndex, record::Candidate};

/// A request to register a candidate in an election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub name: String,
    pub party: String,
    pub age: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl CandidateSpec {
    /// Convert this spec into a fresh candidate at the given index.
    pub fn into_candidate(self, index: CandidateIndex) -> Candidate {
        Candidate {
            index,
            name: self.name,
            party: self.party,
            age: self.age,
            description: self.description,
            image: self.image,
            vote_count: 0,
        }
    }
}
