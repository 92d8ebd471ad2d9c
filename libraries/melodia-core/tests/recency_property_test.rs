//! Property-based tests for the recency list
//!
//! Uses proptest to check the ordering invariants across random play sequences.

use melodia_core::{RecencyList, SongId};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

/// Small id alphabet so sequences contain plenty of re-plays
fn arbitrary_song() -> impl Strategy<Value = SongId> {
    "[a-h]".prop_map(|s: String| SongId::new(s))
}

fn arbitrary_plays() -> impl Strategy<Value = Vec<SongId>> {
    prop::collection::vec(arbitrary_song(), 0..60)
}

/// Reference model: scan, remove, prepend
fn naive_history(plays: &[SongId]) -> Vec<SongId> {
    let mut history: Vec<SongId> = Vec::new();
    for song in plays {
        history.retain(|s| s != song);
        history.insert(0, song.clone());
    }
    history
}

// ===== Property Tests =====

proptest! {
    /// Property: no song ever appears twice
    #[test]
    fn entries_are_unique(plays in arbitrary_plays()) {
        let mut history = RecencyList::new();
        for song in &plays {
            history.append(song.clone());
        }

        let distinct: HashSet<&SongId> = history.iter().collect();
        prop_assert_eq!(distinct.len(), history.len());

        let played: HashSet<&SongId> = plays.iter().collect();
        prop_assert_eq!(played.len(), history.len());
    }

    /// Property: the last play is always at position 0
    #[test]
    fn last_play_is_most_recent(plays in arbitrary_plays(), last in arbitrary_song()) {
        let mut history: RecencyList = plays.into_iter().collect();
        let before = history.len();
        let replay = history.contains(&last);

        history.append(last.clone());

        prop_assert_eq!(history.most_recent(), Some(&last));
        prop_assert_eq!(history.len(), if replay { before } else { before + 1 });
    }

    /// Property: move-to-front keeps the relative order of everything else
    #[test]
    fn others_keep_relative_order(plays in arbitrary_plays(), song in arbitrary_song()) {
        let mut history: RecencyList = plays.into_iter().collect();
        let others_before: Vec<SongId> = history.iter().filter(|s| **s != song).cloned().collect();

        history.append(song.clone());

        let others_after: Vec<SongId> = history.iter().skip(1).cloned().collect();
        prop_assert_eq!(others_before, others_after);
    }

    /// Property: matches the straightforward Vec implementation
    #[test]
    fn matches_naive_model(plays in arbitrary_plays()) {
        let mut history = RecencyList::new();
        for song in &plays {
            history.append(song.clone());
        }

        prop_assert_eq!(history.to_vec(), naive_history(&plays));
    }

    /// Property: removing a song leaves every other entry in place
    #[test]
    fn remove_only_drops_that_song(plays in arbitrary_plays(), song in arbitrary_song()) {
        let mut history: RecencyList = plays.into_iter().collect();
        let expected: Vec<SongId> = history.iter().filter(|s| **s != song).cloned().collect();

        history.remove(&song);

        prop_assert!(!history.contains(&song));
        prop_assert_eq!(history.to_vec(), expected);
    }
}
