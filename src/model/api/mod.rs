//! API-compatible types.
//!
//! The types in this module are what crosses the HTTP boundary:
//!
//! - Requests are deserialised into `*Spec` types.
//! - Read models never include pass-phrases, hashed or otherwise.
//! - Datetimes are serialised as timestamps.

mod caller;
mod candidate;
mod election;
mod organizer;
mod party;
mod receipt;
mod vote;

pub use caller::{Caller, CALLER_HEADER};
pub use candidate::CandidateSpec;
pub use election::{ActiveAndPast, ElectionDetails, ElectionSpec};
pub use organizer::OrganizerSpec;
pub use party::PartyBreakdown;
pub use receipt::{Operation, Receipt};
pub use vote::VoteSpec;
