use serde::{Deserialize, Serialize};

use crate::model::{common::Address, record::Organizer};

/// A request to register (or re-register) an organizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerSpec {
    pub address: Address,
    #[serde(default)]
    pub voters: Vec<Address>,
}

impl From<OrganizerSpec> for Organizer {
    fn from(spec: OrganizerSpec) -> Self {
        Organizer::new(spec.address, spec.voters)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl OrganizerSpec {
        pub fn example() -> Self {
            Self {
                address: Address::organizer(),
                voters: vec![Address::voter(1), Address::voter(2)],
            }
        }
    }
}
