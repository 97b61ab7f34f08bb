use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{CandidateIndex, Sequence};

/// The state-changing operations of the ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    RegisterOrganizer,
    OrganizeElection,
    AddCandidate,
    CastVote,
}

/// Acknowledgment of a successful mutation. Once a caller holds a receipt,
/// the mutation is visible to every subsequent query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Ledger-wide ordinal of this mutation.
    pub sequence: Sequence,
    pub operation: Operation,
    /// The organizer address or election name the mutation applied to.
    pub subject: String,
    /// The candidate registered or voted for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_index: Option<CandidateIndex>,
    #[serde(with = "ts_seconds")]
    pub recorded_at: DateTime<Utc>,
}
