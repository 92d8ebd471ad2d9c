//! Recency list: a deduplicated, most-recently-played-first sequence of songs.
//!
//! Backed by an unbounded [`LruCache`], which pairs a hash map with an
//! intrusive doubly linked list. Re-playing a song moves it to the front in
//! O(1) instead of scanning the list, and removal is O(1) as well.
//!
//! Position 0 is always the most recent play. A song id appears at most once.

use crate::types::SongId;
use lru::LruCache;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Per-listener play history ordered most-recent-first
pub struct RecencyList {
    entries: LruCache<SongId, ()>,
}

impl RecencyList {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            entries: LruCache::unbounded(),
        }
    }

    /// Record a play of `song`.
    ///
    /// An existing occurrence is moved to the front instead of being
    /// duplicated. Returns `true` when the song was already in the list.
    pub fn append(&mut self, song: SongId) -> bool {
        self.entries.push(song, ()).is_some()
    }

    /// Remove `song` if present. Absent songs are a no-op.
    ///
    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, song: &SongId) -> bool {
        self.entries.pop(song).is_some()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The `n` most recent songs (fewer if the list is shorter)
    pub fn recent(&self, n: usize) -> Vec<SongId> {
        self.iter().take(n).cloned().collect()
    }

    /// Iterate from most recent to least recent
    pub fn iter(&self) -> impl Iterator<Item = &SongId> + '_ {
        self.entries.iter().map(|(song, _)| song)
    }

    /// Zero-based position of `song`, 0 being the most recent
    pub fn position(&self, song: &SongId) -> Option<usize> {
        self.iter().position(|s| s == song)
    }

    /// The most recently played song
    pub fn most_recent(&self) -> Option<&SongId> {
        self.iter().next()
    }

    pub fn contains(&self, song: &SongId) -> bool {
        self.entries.contains(song)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the list, most recent first
    pub fn to_vec(&self) -> Vec<SongId> {
        self.iter().cloned().collect()
    }
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a list from songs given most-recent-first.
///
/// If the input repeats a song, its first (most recent) occurrence wins.
impl FromIterator<SongId> for RecencyList {
    fn from_iter<I: IntoIterator<Item = SongId>>(iter: I) -> Self {
        let ordered: Vec<SongId> = iter.into_iter().collect();
        let mut list = Self::new();
        // Oldest first, so the last push ends up at the front
        for song in ordered.into_iter().rev() {
            list.append(song);
        }
        list
    }
}

impl Clone for RecencyList {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl PartialEq for RecencyList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for RecencyList {}

impl fmt::Debug for RecencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Serialize for RecencyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RecencyList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let songs = Vec::<SongId>::deserialize(deserializer)?;
        Ok(songs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<SongId> {
        names.iter().map(|n| SongId::new(*n)).collect()
    }

    fn list(names: &[&str]) -> RecencyList {
        ids(names).into_iter().collect()
    }

    #[test]
    fn append_puts_song_at_front() {
        let mut history = RecencyList::new();
        history.append(SongId::new("a"));
        history.append(SongId::new("b"));

        assert_eq!(history.to_vec(), ids(&["b", "a"]));
        assert_eq!(history.most_recent(), Some(&SongId::new("b")));
    }

    #[test]
    fn appending_twice_keeps_single_entry_at_front() {
        let mut history = list(&["x", "y"]);

        assert!(!history.append(SongId::new("s")));
        assert!(history.append(SongId::new("s")));

        assert_eq!(history.len(), 3);
        assert_eq!(history.position(&SongId::new("s")), Some(0));
        assert_eq!(history.iter().filter(|s| s.as_str() == "s").count(), 1);
    }

    #[test]
    fn replay_moves_to_front_and_preserves_relative_order() {
        let mut history = list(&["s1", "s2", "s3"]);

        history.append(SongId::new("s3"));

        assert_eq!(history.to_vec(), ids(&["s3", "s1", "s2"]));
    }

    #[test]
    fn replay_of_older_song() {
        let mut history = list(&["c", "a"]);

        history.append(SongId::new("a"));

        assert_eq!(history.to_vec(), ids(&["a", "c"]));
    }

    #[test]
    fn removing_absent_song_is_noop() {
        let mut history = list(&["a", "b"]);
        let before = history.clone();

        assert!(!history.remove(&SongId::new("zzz")));
        assert_eq!(history, before);
    }

    #[test]
    fn append_then_remove_restores_previous_state() {
        let mut history = list(&["a", "b", "c"]);
        let before = history.clone();

        history.append(SongId::new("new"));
        history.remove(&SongId::new("new"));

        assert_eq!(history, before);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut history = list(&["a", "b"]);
        history.clear();
        assert!(history.is_empty());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn recent_is_a_prefix() {
        let history = list(&["a", "b", "c", "d"]);

        assert_eq!(history.recent(2), ids(&["a", "b"]));
        assert_eq!(history.recent(10), ids(&["a", "b", "c", "d"]));
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn from_iter_keeps_first_occurrence() {
        let history = list(&["a", "b", "a", "c"]);
        assert_eq!(history.to_vec(), ids(&["a", "b", "c"]));
    }

    #[test]
    fn serde_uses_most_recent_first_sequence() {
        let history = list(&["b", "a"]);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"["b","a"]"#);

        let back: RecencyList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
