mod address;

pub use address::Address;

/// Election IDs are allocated from a single counter, in creation order.
pub type ElectionId = u32;
/// Candidates are identified by their 0-based registration order.
pub type CandidateIndex = u32;
/// Receipts are numbered across the whole ledger.
pub type Sequence = u64;

/// Shortest permitted election, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 10;
/// Fewest candidate slots an election may offer.
pub const MIN_CANDIDATE_SLOTS: u32 = 2;
