use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocket::tokio::{self, sync::Mutex, task::JoinHandle, time::Duration};

use crate::model::common::ElectionId;

use super::Slot;

type CloserMap = HashMap<ElectionId, JoinHandle<()>>;

/// Close notices: scheduled tasks that log each election's final tally once
/// it ends.
pub struct ElectionClosers {
    tasks: Arc<Mutex<CloserMap>>,
}

impl ElectionClosers {
    /// Create an empty set of election closers.
    pub fn new() -> Self {
        Self {
            tasks: Default::default(),
        }
    }

    /// How many close notices are still waiting for their election to end.
    pub async fn pending(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Schedule a close notice for the given election at `end_time`.
    /// An `end_time` in the past fires immediately.
    pub async fn schedule(&self, election_id: ElectionId, slot: Slot, end_time: DateTime<Utc>) {
        let tasks = self.tasks.clone();

        // Hold the lock while spawning so the task cannot remove itself
        // before it has been inserted.
        let mut tasks_locked = self.tasks.lock().await;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(until(end_time)).await;
            announce(&slot).await;
            tasks.lock().await.remove(&election_id);
            trace!("Close notice for election {election_id} done; removed self from list");
        });
        if let Some(previous) = tasks_locked.insert(election_id, handle) {
            previous.abort();
        }
    }

    /// Abort every pending close notice. Returns how many were aborted.
    pub async fn cancel_all(&self) -> usize {
        let mut tasks = self.tasks.lock().await;
        let aborted = tasks.len();
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
        aborted
    }
}

impl Default for ElectionClosers {
    fn default() -> Self {
        Self::new()
    }
}

/// Log the final state of an election.
async fn announce(slot: &Slot) {
    let entry = slot.read().await;
    let election = &entry.election;
    let tally = entry
        .candidates
        .iter()
        .map(|c| format!("#{} {}: {}", c.index, c.name, c.vote_count))
        .collect::<Vec<_>>()
        .join(", ");
    info!(
        "Election '{}' (ID {}) closed with {} votes [{tally}]",
        election.name,
        election.id,
        entry.total_votes()
    );
}

/// Time from now until `datetime`, or zero if it has passed.
fn until(datetime: DateTime<Utc>) -> Duration {
    let millis = (datetime - Utc::now()).num_milliseconds();
    Duration::from_millis(u64::try_from(millis).unwrap_or(0))
}
