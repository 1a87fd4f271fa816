//! Tournament state engine
//!
//! Four total, side-effect-free transitions over [`Snapshot`] values. The
//! engine owns no state; callers hold the current snapshot and replace it with
//! whatever these functions return.

use std::cmp::Ordering;

use super::snapshot::{Snapshot, VoteRound};
use crate::types::{EntryId, VoterId};

/// Pair members that advance out of `vote`.
///
/// The member with more votes advances alone; on a tie (including an untallied
/// 0:0) both advance in pair order. No active round yields nobody.
pub fn resolve_winners(vote: Option<&VoteRound>) -> Vec<EntryId> {
    let Some(vote) = vote else {
        return Vec::new();
    };

    let [a, b] = &vote.pair;
    match vote.votes_for(a).cmp(&vote.votes_for(b)) {
        Ordering::Greater => vec![a.clone()],
        Ordering::Less => vec![b.clone()],
        Ordering::Equal => vec![a.clone(), b.clone()],
    }
}

/// Replace the entry queue, leaving any active round and winner as they are.
pub fn seed_entries<I>(snapshot: &Snapshot, entries: I) -> Snapshot
where
    I: IntoIterator<Item = EntryId>,
{
    let mut next = snapshot.clone();
    next.entries = entries.into_iter().collect();
    next
}

/// Close the active round and open the next one.
///
/// Winners of the active round join the tail of the queue. A queue of exactly
/// one member ends the tournament with that member as winner; otherwise the
/// first two members are paired under the next round number. An empty queue
/// with no active round has nothing to pair and leaves the snapshot unchanged.
pub fn advance_round(snapshot: &Snapshot) -> Snapshot {
    let mut queue = snapshot
        .entries
        .iter()
        .cloned()
        .chain(resolve_winners(snapshot.current_vote.as_ref()))
        .collect::<Vec<_>>()
        .into_iter();

    match (queue.next(), queue.next()) {
        (None, _) => snapshot.clone(),
        (Some(winner), None) => Snapshot {
            entries: Vec::new(),
            current_vote: None,
            winner: Some(winner),
        },
        (Some(a), Some(b)) => Snapshot {
            entries: queue.collect(),
            current_vote: Some(VoteRound::new(snapshot.round() + 1, [a, b])),
            winner: None,
        },
    }
}

/// Record `voter`'s ballot in `vote`.
///
/// Any standing choice of `voter` is withdrawn first, so repeating a ballot is
/// a no-op and a different ballot moves the vote. A ballot for an entry outside
/// the pair (or no entry at all) only withdraws.
pub fn cast_vote(vote: &VoteRound, entry: Option<&EntryId>, voter: &VoterId) -> VoteRound {
    let mut next = vote.clone();

    if let Some(previous) = next.votes.remove(voter) {
        if let Some(count) = next.tally.get_mut(&previous) {
            *count = count.saturating_sub(1);
        }
    }

    if let Some(entry) = entry.filter(|entry| vote.contains(entry)) {
        *next.tally.entry(entry.clone()).or_insert(0) += 1;
        next.votes.insert(voter.clone(), entry.clone());
    }

    next
}

/// Start over from `initial_entries`.
///
/// The previous snapshot is discarded wholesale, so the new pairing is always
/// round 1 no matter how far the old tournament got.
pub fn reset_voting<I>(_previous: &Snapshot, initial_entries: I) -> Snapshot
where
    I: IntoIterator<Item = EntryId>,
{
    advance_round(&seed_entries(&Snapshot::new(), initial_entries))
}
