//! The authoritative record store.
//!
//! Every election lives in its own slot behind a read/write lock. Mutations
//! take the slot's write lock, so two mutations of the same election are
//! totally ordered while mutations of different elections run side by side.
//! Queries take read locks only long enough to copy out a snapshot.
//!
//! The election index has its own lock, held for writing only while a new
//! election is inserted; this is what makes the duplicate-name check and
//! the insert a single step.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocket::{
    fairing::{Fairing, Info, Kind},
    tokio::{
        sync::RwLock,
        time::{timeout, Duration},
    },
    Build, Orbit, Rocket,
};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{
    api::{ElectionDetails, Operation, Receipt},
    common::{Address, CandidateIndex, ElectionId, Sequence},
    record::{Candidate, Election, Organizer, Vote},
};

mod closer;
mod mutation;
mod query;

pub use closer::ElectionClosers;

/// A shared handle on one election's records.
pub type Slot = Arc<RwLock<ElectionEntry>>;

/// An election together with the candidates and votes it owns.
#[derive(Debug)]
pub struct ElectionEntry {
    pub election: Election,
    /// Candidates in registration order; `candidates[i].index == i`.
    pub candidates: Vec<Candidate>,
    /// Votes in the order they were recorded.
    pub votes: Vec<Vote>,
    /// Everyone in `votes`, for the one-vote-per-voter constraint.
    voted: HashSet<Address>,
}

impl ElectionEntry {
    fn new(election: Election) -> Self {
        Self {
            election,
            candidates: Vec::new(),
            votes: Vec::new(),
            voted: HashSet::new(),
        }
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voted.contains(voter)
    }

    /// Voters in the order their votes were recorded.
    pub fn voters(&self) -> impl Iterator<Item = &Address> {
        self.votes.iter().map(|vote| &vote.voter)
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.len() as u64
    }

    /// Record a vote for the candidate at `position`, enforcing that each
    /// voter appears at most once.
    fn record_vote(
        &mut self,
        voter: &Address,
        position: usize,
        now: DateTime<Utc>,
    ) -> Result<CandidateIndex> {
        if self.voted.contains(voter) {
            return Err(Error::AlreadyVoted);
        }
        let candidate = self
            .candidates
            .get_mut(position)
            .ok_or(Error::CandidateIndexOutOfBound(position as i64))?;
        candidate.vote_count += 1;
        let candidate_index = candidate.index;

        self.voted.insert(voter.clone());
        self.votes.push(Vote {
            voter: voter.clone(),
            candidate_index,
            cast_at: now,
        });
        Ok(candidate_index)
    }

    /// A flattened view of this election as of `now`.
    pub fn details(&self, now: DateTime<Utc>) -> ElectionDetails {
        ElectionDetails::new(
            &self.election,
            self.candidates.clone(),
            self.total_votes(),
            now,
        )
    }
}

/// Elections by name, plus creation order.
#[derive(Default)]
struct ElectionIndex {
    by_name: HashMap<String, Slot>,
    in_order: Vec<Slot>,
    next_id: ElectionId,
}

/// The single writer of truth for organizers, elections, candidates and votes.
pub struct RecordStore {
    organizers: RwLock<HashMap<Address, Organizer>>,
    elections: RwLock<ElectionIndex>,
    next_sequence: AtomicU64,
    /// Upper bound on waiting for any lock during a mutation.
    mutation_timeout: Duration,
    closers: Option<ElectionClosers>,
}

impl RecordStore {
    /// Create an empty store. With `close_notices`, a task is scheduled for
    /// every new election that logs its result once it ends.
    pub fn new(mutation_timeout: Duration, close_notices: bool) -> Self {
        Self {
            organizers: Default::default(),
            elections: Default::default(),
            next_sequence: AtomicU64::new(0),
            mutation_timeout,
            closers: close_notices.then(ElectionClosers::new),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mutation_timeout(), config.close_notices())
    }

    /// The close-notice scheduler, if enabled.
    pub fn closers(&self) -> Option<&ElectionClosers> {
        self.closers.as_ref()
    }

    /// Wait for `fut`, but no longer than the mutation timeout.
    async fn bounded<F: Future>(&self, what: impl Display, fut: F) -> Result<F::Output> {
        timeout(self.mutation_timeout, fut).await.map_err(|_| {
            warn!("Gave up waiting for {what} after {:?}", self.mutation_timeout);
            Error::Timeout(what.to_string())
        })
    }

    /// Look up an election's slot by name.
    async fn slot(&self, name: &str) -> Option<Slot> {
        self.elections.read().await.by_name.get(name).cloned()
    }

    /// Every election's slot, in creation order.
    async fn slots(&self) -> Vec<Slot> {
        self.elections.read().await.in_order.clone()
    }

    fn receipt(
        &self,
        operation: Operation,
        subject: impl Display,
        candidate_index: Option<CandidateIndex>,
        now: DateTime<Utc>,
    ) -> Receipt {
        let sequence: Sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        Receipt {
            sequence,
            operation,
            subject: subject.to_string(),
            candidate_index,
            recorded_at: now,
        }
    }
}

/// A fairing that builds the record store from the application config and
/// places it into managed state. On shutdown it aborts any close notices
/// still waiting for their election to end.
/// This fairing depends on the config being available in managed state,
/// and so must be attached after the fairing responsible for that.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Record Store",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let store = match rocket.state::<Config>() {
            Some(config) => RecordStore::from_config(config),
            None => {
                error!("Config was not available when creating the record store");
                return Err(rocket);
            }
        };
        info!("Record store ready");
        Ok(rocket.manage(store))
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        let Some(closers) = rocket.state::<RecordStore>().and_then(RecordStore::closers) else {
            return;
        };
        let pending = closers.pending().await;
        if pending > 0 {
            info!("Dropping {pending} pending close notices");
            closers.cancel_all().await;
        }
    }
}
