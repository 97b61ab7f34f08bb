use serde::{Deserialize, Serialize};

use crate::model::common::Address;

/// An identity allowed to organize elections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub address: Address,
    /// Voters granted at registration time. Duplicates are dropped, keeping
    /// first-seen order.
    pub voters: Vec<Address>,
}

impl Organizer {
    pub fn new(address: Address, voters: Vec<Address>) -> Self {
        let mut unique = Vec::with_capacity(voters.len());
        for voter in voters {
            if !unique.contains(&voter) {
                unique.push(voter);
            }
        }
        Self {
            address,
            voters: unique,
        }
    }
}
