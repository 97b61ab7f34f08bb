use serde::{Deserialize, Serialize};

/// A vote a voter wishes to cast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteSpec {
    pub pass_phrase: String,
    /// Signed so that a negative index is reported as out of bound rather
    /// than as a malformed request.
    pub candidate_index: i64,
}

impl VoteSpec {
    pub fn new(pass_phrase: impl Into<String>, candidate_index: i64) -> Self {
        Self {
            pass_phrase: pass_phrase.into(),
            candidate_index,
        }
    }
}
