//! Tournament state values
//!
//! Plain value types with structural equality. Every engine operation takes a
//! value and returns a new one; nothing here is mutated in place once handed
//! out by the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{EntryId, VoterId};

/// The active pairwise matchup with its tally and per-voter record.
///
/// `tally[e]` always equals the number of `votes` whose value is `e`.
/// A tally may hold an explicit zero for an entry whose last vote was revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRound {
    pub round: u32,
    pub pair: [EntryId; 2],
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tally: BTreeMap<EntryId, u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub votes: BTreeMap<VoterId, EntryId>,
}

impl VoteRound {
    /// Fresh round with an empty tally
    pub fn new(round: u32, pair: [EntryId; 2]) -> Self {
        Self {
            round,
            pair,
            tally: BTreeMap::new(),
            votes: BTreeMap::new(),
        }
    }

    /// Builder-style tally override, mostly for fixtures
    pub fn with_tally<I>(mut self, tally: I) -> Self
    where
        I: IntoIterator<Item = (EntryId, u32)>,
    {
        self.tally = tally.into_iter().collect();
        self
    }

    /// Votes counted for `entry`, zero when untallied
    pub fn votes_for(&self, entry: &EntryId) -> u32 {
        self.tally.get(entry).copied().unwrap_or(0)
    }

    pub fn contains(&self, entry: &EntryId) -> bool {
        self.pair.contains(entry)
    }

    /// Choice currently recorded for `voter`
    pub fn choice_of(&self, voter: &VoterId) -> Option<&EntryId> {
        self.votes.get(voter)
    }

    pub fn total_votes(&self) -> usize {
        self.votes.len()
    }
}

/// Complete tournament state at one point in time.
///
/// `winner` is set only once the process is terminal, and `current_vote` only
/// while it is active. The wire field for `current_vote` is `vote`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntryId>,
    #[serde(rename = "vote", default, skip_serializing_if = "Option::is_none")]
    pub current_vote: Option<VoteRound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<EntryId>,
}

impl Snapshot {
    /// Empty snapshot, the starting point before any entries are seeded
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<EntryId>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_vote(mut self, vote: VoteRound) -> Self {
        self.current_vote = Some(vote);
        self
    }

    /// Round number of the active vote, 0 before the first pairing
    pub fn round(&self) -> u32 {
        self.current_vote.as_ref().map_or(0, |vote| vote.round)
    }

    pub fn is_active(&self) -> bool {
        self.current_vote.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }
}
