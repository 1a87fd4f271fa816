//! Single-elimination pairwise tournament
//!
//! - `snapshot`: the state values (`Snapshot`, `VoteRound`)
//! - `engine`: pure transitions over those values

pub mod engine;
pub mod snapshot;

pub use engine::{advance_round, cast_vote, reset_voting, resolve_winners, seed_entries};
pub use snapshot::{Snapshot, VoteRound};
