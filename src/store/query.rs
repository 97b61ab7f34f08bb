//! Read-only views of the store.
//!
//! Each query copies what it needs out from under the locks and releases
//! them before building its result.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::{
    api::{ActiveAndPast, ElectionDetails},
    common::Address,
    record::{Candidate, Organizer},
};

use super::{RecordStore, Slot};

impl RecordStore {
    async fn existing(&self, name: &str) -> Result<Slot> {
        self.slot(name)
            .await
            .ok_or_else(|| Error::not_found(format!("Election '{name}'")))
    }

    /// Seconds until the named election ends; zero once it has.
    pub async fn time_left(&self, name: &str, now: DateTime<Utc>) -> Result<u64> {
        let slot = self.existing(name).await?;
        let entry = slot.read().await;
        Ok(entry.election.time_left(now))
    }

    /// Names of every election, split by whether they are active at `now`.
    pub async fn active_and_past_election_names(
        &self,
        now: DateTime<Utc>,
    ) -> ActiveAndPast<String> {
        let mut names = ActiveAndPast::default();
        for slot in self.slots().await {
            let entry = slot.read().await;
            names.push(entry.election.is_active(now), entry.election.name.clone());
        }
        names
    }

    /// Names of every election in creation order.
    pub async fn all_election_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for slot in self.slots().await {
            names.push(slot.read().await.election.name.clone());
        }
        names
    }

    pub async fn election_details(&self, name: &str, now: DateTime<Utc>) -> Result<ElectionDetails> {
        let slot = self.existing(name).await?;
        let details = slot.read().await.details(now);
        Ok(details)
    }

    /// Full details of every election, split into active and past.
    pub async fn election_summaries(&self, now: DateTime<Utc>) -> ActiveAndPast<ElectionDetails> {
        let mut summaries = ActiveAndPast::default();
        for slot in self.slots().await {
            let details = slot.read().await.details(now);
            summaries.push(details.is_active, details);
        }
        summaries
    }

    /// The named election's candidates in index order.
    pub async fn candidates_of(&self, name: &str) -> Result<Vec<Candidate>> {
        let slot = self.existing(name).await?;
        let candidates = slot.read().await.candidates.clone();
        Ok(candidates)
    }

    /// How many candidates have been registered in the named election.
    pub async fn added_candidates(&self, name: &str) -> Result<usize> {
        let slot = self.existing(name).await?;
        let count = slot.read().await.candidates.len();
        Ok(count)
    }

    /// Names of the elections organized by `address`, in creation order.
    /// Unknown addresses simply have none.
    pub async fn elections_organized_by(&self, address: &Address) -> Vec<String> {
        let mut names = Vec::new();
        for slot in self.slots().await {
            let entry = slot.read().await;
            if entry.election.organizer == *address {
                names.push(entry.election.name.clone());
            }
        }
        names
    }

    /// Everyone who has voted in the named election, in the order their
    /// votes were recorded.
    pub async fn voters_of(&self, name: &str) -> Result<Vec<Address>> {
        let slot = self.existing(name).await?;
        let voters = slot.read().await.voters().cloned().collect();
        Ok(voters)
    }

    pub async fn organizer(&self, address: &Address) -> Result<Organizer> {
        self.organizers
            .read()
            .await
            .get(address)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Organizer {address}")))
    }
}
