use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    common::{Address, ElectionId},
    record::{Candidate, Election},
};

use super::PartyBreakdown;

/// A request to organize a new election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSpec {
    /// Unique election name.
    pub name: String,
    /// Number of candidate slots.
    pub total_candidate: u32,
    /// Length of the voting window in minutes.
    pub duration_minutes: u32,
    /// Plaintext pass-phrase; hashed before it is stored.
    pub pass_phrase: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// Everything a client needs to display an election.
/// Never includes the pass-phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionDetails {
    pub id: ElectionId,
    pub name: String,
    pub organizer: Address,
    pub description: String,
    pub image: String,
    /// Candidate capacity.
    pub total_candidate: u32,
    /// Number of votes cast so far.
    pub total_vote: u64,
    #[serde(with = "ts_seconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "ts_seconds")]
    pub end_time: DateTime<Utc>,
    /// Seconds until the election ends; zero once it has.
    pub time_left: u64,
    pub is_active: bool,
    pub candidates: Vec<Candidate>,
    pub party_info: PartyBreakdown,
}

impl ElectionDetails {
    /// Flatten an election and its candidates into a view as of `now`.
    pub fn new(
        election: &Election,
        candidates: Vec<Candidate>,
        total_vote: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let time_left = election.time_left(now);
        let party_info = PartyBreakdown::of(&candidates);
        Self {
            id: election.id,
            name: election.name.clone(),
            organizer: election.organizer.clone(),
            description: election.description.clone(),
            image: election.image.clone(),
            total_candidate: election.total_candidate_slots,
            total_vote,
            start_time: election.start_time,
            end_time: election.end_time,
            time_left,
            is_active: time_left > 0,
            candidates,
            party_info,
        }
    }
}

/// Any per-election listing, split into active and past elections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAndPast<T> {
    pub active: Vec<T>,
    pub past: Vec<T>,
}

impl<T> Default for ActiveAndPast<T> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            past: Vec::new(),
        }
    }
}

impl<T> ActiveAndPast<T> {
    /// File an item under active or past.
    pub fn push(&mut self, is_active: bool, item: T) {
        if is_active {
            self.active.push(item);
        } else {
            self.past.push(item);
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ElectionSpec {
        /// The running example: two slots, ten minutes, pass-phrase "p".
        pub fn example() -> Self {
            Self::named("E1")
        }

        pub fn named(name: &str) -> Self {
            Self {
                name: name.to_string(),
                total_candidate: 2,
                duration_minutes: 10,
                pass_phrase: "p".to_string(),
                description: "Class representative".to_string(),
                image: "https://example.com/e1.png".to_string(),
            }
        }
    }
}
