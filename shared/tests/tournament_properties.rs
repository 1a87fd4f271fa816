//! Property tests for the tournament engine

use proptest::prelude::*;
use shared::tournament::{advance_round, cast_vote, reset_voting, seed_entries};
use shared::{EntryId, Snapshot, VoterId};

fn distinct_entries() -> impl Strategy<Value = Vec<EntryId>> {
    prop::collection::btree_set("[a-z]{1,6}", 2..24)
        .prop_map(|names| names.into_iter().map(EntryId::from).collect())
}

/// Run a tournament where the first pair member always collects one vote.
fn play_out(initial: Vec<EntryId>) -> (Snapshot, usize) {
    let mut state = advance_round(&seed_entries(&Snapshot::new(), initial));
    let mut rounds = usize::from(state.is_active());

    while let Some(vote) = state.current_vote.take() {
        let leader = vote.pair[0].clone();
        state.current_vote = Some(cast_vote(&vote, Some(&leader), &VoterId::from("judge")));
        state = advance_round(&state);
        if state.is_active() {
            rounds += 1;
        }
    }

    (state, rounds)
}

proptest! {
    #[test]
    fn tournament_finishes_in_n_minus_one_rounds(initial in distinct_entries()) {
        let (finished, rounds) = play_out(initial.clone());

        prop_assert_eq!(rounds, initial.len() - 1);
        prop_assert!(finished.entries.is_empty());
        prop_assert!(finished.current_vote.is_none());
        let winner = finished.winner.expect("tournament must produce a winner");
        prop_assert!(initial.contains(&winner));
    }

    #[test]
    fn tally_always_matches_recorded_votes(
        ballots in prop::collection::vec((0usize..6, 0usize..4), 0..64)
    ) {
        let candidates = ["A", "B", "C", "D"].map(EntryId::from);
        let state = reset_voting(&Snapshot::new(), candidates.clone());
        let mut vote = state.current_vote.expect("two entries always open a round");

        for (voter, choice) in ballots {
            vote = cast_vote(&vote, Some(&candidates[choice]), &VoterId::new(format!("voter-{voter}")));
        }

        for member in &vote.pair {
            let recorded = vote.votes.values().filter(|choice| *choice == member).count() as u32;
            prop_assert_eq!(vote.votes_for(member), recorded);
        }
        prop_assert!(vote.tally.keys().all(|entry| vote.pair.contains(entry)));
        prop_assert!(vote.votes.values().all(|entry| vote.pair.contains(entry)));
    }

    #[test]
    fn reset_always_opens_round_one(prior_round in 1u32..10_000, initial in distinct_entries()) {
        let stale = Snapshot::with_entries(Vec::new())
            .with_vote(shared::VoteRound::new(prior_round, ["X".into(), "Y".into()]));

        let fresh = reset_voting(&stale, initial.clone());

        prop_assert_eq!(fresh.round(), 1);
        prop_assert!(fresh.winner.is_none());
        let pair = fresh.current_vote.expect("at least two entries").pair;
        prop_assert_eq!(&pair[..], &initial[..2]);
        prop_assert_eq!(&fresh.entries[..], &initial[2..]);
    }
}
