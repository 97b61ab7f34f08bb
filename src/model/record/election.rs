use chrono::{DateTime, Duration, Utc};

use crate::model::common::{Address, ElectionId};

use super::PassPhrase;

/// Core election data, as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Election {
    /// Unique ID, allocated in creation order.
    pub id: ElectionId,
    /// Unique name. Case-sensitive, never reused.
    pub name: String,
    /// The organizer who created this election.
    pub organizer: Address,
    /// Maximum number of candidates.
    pub total_candidate_slots: u32,
    /// Length of the voting window.
    pub duration_minutes: u32,
    /// Hashed pass-phrase gating every vote.
    pub pass_phrase: PassPhrase,
    pub description: String,
    /// Image reference, passed through untouched.
    pub image: String,
    /// When the election was organized.
    pub start_time: DateTime<Utc>,
    /// `start_time + duration_minutes`.
    pub end_time: DateTime<Utc>,
}

impl Election {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ElectionId,
        name: String,
        organizer: Address,
        total_candidate_slots: u32,
        duration_minutes: u32,
        pass_phrase: PassPhrase,
        description: String,
        image: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            organizer,
            total_candidate_slots,
            duration_minutes,
            pass_phrase,
            description,
            image,
            start_time: now,
            end_time: now + Duration::minutes(duration_minutes.into()),
        }
    }

    /// Seconds remaining until the election ends, rounded up, or zero once it has ended.
    ///
    /// Any sub-second remainder counts as a whole second, so `time_left(now) > 0`
    /// exactly when `now < end_time`.
    pub fn time_left(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.end_time - now;
        if remaining <= Duration::zero() {
            return 0;
        }
        let whole = remaining.num_seconds();
        let seconds = if remaining > Duration::seconds(whole) {
            whole + 1
        } else {
            whole
        };
        u64::try_from(seconds).unwrap_or(0)
    }

    /// An election is active until its end time.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.end_time
    }
}
