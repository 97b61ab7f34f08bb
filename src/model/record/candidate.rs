use serde::{Deserialize, Serialize};

use crate::model::common::CandidateIndex;

/// A contestant within one election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Position in registration order; stable for the life of the election.
    pub index: CandidateIndex,
    pub name: String,
    /// Party name, compared exactly.
    pub party: String,
    pub age: u32,
    pub description: String,
    pub image: String,
    /// Number of votes received so far. Only ever increases.
    pub vote_count: u64,
}
