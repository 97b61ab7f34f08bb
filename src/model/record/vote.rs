use chrono::{DateTime, Utc};

use crate::model::common::{Address, CandidateIndex};

/// A single recorded vote. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter: Address,
    pub candidate_index: CandidateIndex,
    pub cast_at: DateTime<Utc>,
}
