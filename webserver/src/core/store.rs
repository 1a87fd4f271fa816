//! Tournament store: the dispatch layer over the pure engine
//!
//! Holds the one current snapshot and applies actions to it strictly one at a
//! time. Callers share the store behind a single lock, which is what gives
//! concurrent client actions their total order.

use shared::tournament::{advance_round, cast_vote, reset_voting, seed_entries};
use shared::{Action, EntryId, ProcessId, Snapshot, VoterId};

/// Result of applying one action
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Version of the committed snapshot
    pub version: u64,
    /// Whether the action changed the snapshot
    pub changed: bool,
    pub state: Snapshot,
}

/// Owner of the current tournament snapshot
#[derive(Debug, Default)]
pub struct TournamentStore {
    state: Snapshot,
    initial_entries: Vec<EntryId>,
    version: u64,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    /// Number of actions applied so far
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn initial_entries(&self) -> &[EntryId] {
        &self.initial_entries
    }

    /// Entries a `RESET_VOTING` restarts from
    pub fn set_initial_entries(&mut self, entries: Vec<EntryId>) {
        self.initial_entries = entries;
    }

    /// Apply `action` and commit the resulting snapshot.
    ///
    /// `session` is the voter for a `VOTE` that carries no `clientId`. A vote
    /// while no round is active leaves the snapshot unchanged but still counts
    /// as an applied action.
    pub fn dispatch(&mut self, action: Action, session: &VoterId) -> DispatchOutcome {
        let kind = action.kind();

        let next = match action {
            Action::SetEntries { entries } => seed_entries(&self.state, entries),
            Action::Next => advance_round(&self.state),
            Action::Vote { entry, client_id } => match &self.state.current_vote {
                Some(vote) => {
                    let voter = client_id.unwrap_or_else(|| session.clone());
                    Snapshot {
                        current_vote: Some(cast_vote(vote, entry.as_ref(), &voter)),
                        ..self.state.clone()
                    }
                }
                None => {
                    shared::process_debug!(ProcessId::current(), "Ignoring vote from {}: no active round", session);
                    self.state.clone()
                }
            },
            Action::ResetVoting => reset_voting(&self.state, self.initial_entries.iter().cloned()),
        };

        let changed = next != self.state;
        self.log_transition(&next);
        self.state = next;
        self.version += 1;

        shared::process_debug!(ProcessId::current(), action = kind, version = self.version, changed, "Applied action");

        DispatchOutcome {
            version: self.version,
            changed,
            state: self.state.clone(),
        }
    }

    fn log_transition(&self, next: &Snapshot) {
        if next.round() != self.state.round() {
            if let Some(vote) = &next.current_vote {
                shared::process_info!(
                    ProcessId::current(),
                    round = vote.round,
                    queued = next.entries.len(),
                    "🗳️ Round {} opened: {} vs {}",
                    vote.round,
                    vote.pair[0],
                    vote.pair[1]
                );
            }
        }

        if next.winner != self.state.winner {
            if let Some(winner) = &next.winner {
                shared::process_info!(ProcessId::current(), winner = %winner, "🏆 Tournament finished, winner: {}", winner);
            }
        }
    }
}
