//! The four state-changing operations.
//!
//! Each validates in a fixed order, fails on the first violated
//! precondition, and applies nothing unless every check passes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocket::tokio::{sync::RwLock, task};

use crate::error::{Error, Result, Unexpected, ValueKind};
use crate::model::{
    api::{CandidateSpec, ElectionSpec, Operation, OrganizerSpec, Receipt, VoteSpec},
    common::{Address, CandidateIndex, MIN_CANDIDATE_SLOTS, MIN_DURATION_MINUTES},
    record::{Election, Organizer, PassPhrase},
};

use super::{ElectionEntry, RecordStore};

impl RecordStore {
    /// Register an organizer, replacing the voter set of any existing
    /// registration for the same address.
    pub async fn register_organizer(
        &self,
        caller: &Address,
        spec: OrganizerSpec,
        now: DateTime<Utc>,
    ) -> Result<Receipt> {
        let organizer = Organizer::from(spec);
        let address = organizer.address.clone();
        let voters = organizer.voters.len();

        let replaced = self
            .bounded("the organizer table", self.organizers.write())
            .await?
            .insert(address.clone(), organizer)
            .is_some();

        if replaced {
            info!("{caller} re-registered organizer {address} with {voters} voters");
        } else {
            info!("{caller} registered organizer {address} with {voters} voters");
        }
        Ok(self.receipt(Operation::RegisterOrganizer, &address, None, now))
    }

    /// Organize a new election on behalf of `caller`, starting at `now`.
    pub async fn organize_election(
        &self,
        caller: &Address,
        spec: ElectionSpec,
        now: DateTime<Utc>,
    ) -> Result<Receipt> {
        // Only registered organizers may organize.
        let is_organizer = self
            .bounded("the organizer table", self.organizers.read())
            .await?
            .contains_key(caller);
        if !is_organizer {
            return Err(Error::InvalidOrganizer);
        }

        // Validate the spec itself.
        if spec.pass_phrase.is_empty() {
            return Err(Error::EmptyPassPhrase);
        }
        if spec.duration_minutes < MIN_DURATION_MINUTES {
            return Err(Error::InsufficientValue(ValueKind::Duration));
        }
        if spec.total_candidate < MIN_CANDIDATE_SLOTS {
            return Err(Error::InsufficientValue(ValueKind::CandidateCount));
        }

        // Fail early on a known duplicate before paying for the hash.
        // The authoritative check happens again under the write lock.
        let exists = self
            .bounded("the election index", self.elections.read())
            .await?
            .by_name
            .contains_key(&spec.name);
        if exists {
            return Err(Error::DuplicateName(spec.name));
        }

        // Hash the pass-phrase off the async workers.
        let ElectionSpec {
            name,
            total_candidate,
            duration_minutes,
            pass_phrase,
            description,
            image,
        } = spec;
        let pass_phrase = task::spawn_blocking(move || PassPhrase::hash(&pass_phrase)).await??;

        // Allocate the ID and insert atomically.
        let (slot, election_id, end_time) = {
            let mut index = self
                .bounded("the election index", self.elections.write())
                .await?;
            if index.by_name.contains_key(&name) {
                return Err(Error::DuplicateName(name));
            }
            let id = index.next_id;
            index.next_id = id
                .checked_add(1)
                .ok_or_else(|| Unexpected::Internal("election IDs exhausted".to_string()))?;

            let election = Election::new(
                id,
                name.clone(),
                caller.clone(),
                total_candidate,
                duration_minutes,
                pass_phrase,
                description,
                image,
                now,
            );
            let end_time = election.end_time;
            let slot = Arc::new(RwLock::new(ElectionEntry::new(election)));
            index.by_name.insert(name.clone(), slot.clone());
            index.in_order.push(slot.clone());
            (slot, id, end_time)
        };
        info!("{caller} organized election '{name}' (ID {election_id}), ending at {end_time}");

        if let Some(closers) = &self.closers {
            closers.schedule(election_id, slot, end_time).await;
        }

        Ok(self.receipt(Operation::OrganizeElection, &name, None, now))
    }

    /// Register a candidate in an election organized by `caller`.
    pub async fn add_candidate(
        &self,
        caller: &Address,
        election_name: &str,
        spec: CandidateSpec,
        now: DateTime<Utc>,
    ) -> Result<Receipt> {
        // An election that doesn't exist has no organizer the caller could match.
        let slot = self
            .bounded("the election index", self.slot(election_name))
            .await?
            .ok_or(Error::InvalidOrganizer)?;
        let mut entry = self
            .bounded(format!("election '{election_name}'"), slot.write())
            .await?;

        if entry.election.organizer != *caller {
            return Err(Error::InvalidOrganizer);
        }
        if !entry.election.is_active(now) {
            return Err(Error::ElectionEnded);
        }
        let index = CandidateIndex::try_from(entry.candidates.len())
            .ok()
            .filter(|count| *count < entry.election.total_candidate_slots)
            .ok_or(Error::CandidateOverflow)?;

        let candidate = spec.into_candidate(index);
        info!(
            "{caller} added candidate #{index} '{}' ({}) to election '{election_name}'",
            candidate.name, candidate.party
        );
        entry.candidates.push(candidate);
        drop(entry);

        Ok(self.receipt(Operation::AddCandidate, election_name, Some(index), now))
    }

    /// Cast `voter`'s single vote in an election.
    pub async fn cast_vote(
        &self,
        voter: &Address,
        election_name: &str,
        spec: VoteSpec,
        now: DateTime<Utc>,
    ) -> Result<Receipt> {
        // An election that doesn't exist has no candidates to vote for.
        let slot = self
            .bounded("the election index", self.slot(election_name))
            .await?
            .ok_or(Error::ZeroCandidate)?;

        // The pass-phrase never changes, so it is checked from a snapshot
        // rather than while holding the election's lock.
        let pass_phrase = {
            let entry = self
                .bounded(format!("election '{election_name}'"), slot.read())
                .await?;
            check_open_for_votes(&entry, now)?;
            entry.election.pass_phrase.clone()
        };
        let attempt = spec.pass_phrase;
        let matches = task::spawn_blocking(move || pass_phrase.verify(&attempt)).await??;
        if !matches {
            return Err(Error::InvalidPassPhrase);
        }

        let mut entry = self
            .bounded(format!("election '{election_name}'"), slot.write())
            .await?;
        check_open_for_votes(&entry, now)?;
        if entry.has_voted(voter) {
            return Err(Error::AlreadyVoted);
        }
        let position = usize::try_from(spec.candidate_index)
            .ok()
            .filter(|position| *position < entry.candidates.len())
            .ok_or(Error::CandidateIndexOutOfBound(spec.candidate_index))?;

        let index = entry.record_vote(voter, position, now)?;
        drop(entry);
        debug!("{voter} voted for candidate #{index} in election '{election_name}'");

        Ok(self.receipt(Operation::CastVote, election_name, Some(index), now))
    }
}

/// An election accepts votes once it has a candidate and until it ends.
fn check_open_for_votes(entry: &ElectionEntry, now: DateTime<Utc>) -> Result<()> {
    if entry.candidates.is_empty() {
        return Err(Error::ZeroCandidate);
    }
    if !entry.election.is_active(now) {
        return Err(Error::ElectionEnded);
    }
    Ok(())
}
