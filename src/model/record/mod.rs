//! Records owned by the store.
//!
//! These are the authoritative shapes. Anything that leaves the service goes
//! through the types in [`crate::model::api`] instead, so that secrets such as
//! pass-phrase hashes are never exposed.

mod candidate;
mod election;
mod organizer;
mod pass_phrase;
mod vote;

pub use candidate::Candidate;
pub use election::Election;
pub use organizer::Organizer;
pub use pass_phrase::PassPhrase;
pub use vote::Vote;
