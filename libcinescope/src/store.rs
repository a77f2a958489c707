//! Global store slice: current search text and recent searches
//!
//! The slice is only changed through [`reduce`], which applies one
//! [`StoreAction`] and returns the next slice. All actions are total: no
//! input is rejected and no error is possible.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of remembered searches
pub const HISTORY_LIMIT: usize = 5;

/// Key under which the slice is persisted
pub const PERSIST_KEY: &str = "persist:movies";

/// A remembered past search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: Uuid,
    pub keyword: String,
}

impl SearchHistoryEntry {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            keyword: keyword.into(),
        }
    }
}

/// The movies slice of the global store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieStore {
    /// Contents of the search box
    #[serde(default)]
    pub query: String,

    /// Recent searches, newest first, at most [`HISTORY_LIMIT`]
    #[serde(default)]
    pub searches: Vec<SearchHistoryEntry>,
}

/// Mutations of the movies slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Replace the current query
    SetQuery(String),
    /// Record a submitted search at the front of the history
    AddQuery(String),
    /// Remove the history entry at this position
    RemoveQuery(usize),
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keywords of the history, newest first
    pub fn keywords(&self) -> Vec<&str> {
        self.searches.iter().map(|e| e.keyword.as_str()).collect()
    }

    /// Restore the history bound on a slice loaded from elsewhere
    pub fn normalized(mut self) -> Self {
        self.searches.truncate(HISTORY_LIMIT);
        self
    }
}

/// Apply one action to the slice
pub fn reduce(mut store: MovieStore, action: StoreAction) -> MovieStore {
    match action {
        StoreAction::SetQuery(query) => {
            store.query = query;
        }
        StoreAction::AddQuery(keyword) => {
            // Oldest entries sit at the back.
            while store.searches.len() >= HISTORY_LIMIT {
                store.searches.pop();
            }
            store.searches.insert(0, SearchHistoryEntry::new(keyword));
        }
        StoreAction::RemoveQuery(index) => {
            if index < store.searches.len() {
                store.searches.remove(index);
            }
        }
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_history(keywords: &[&str]) -> MovieStore {
        // Apply oldest first so the result lists `keywords` newest first.
        keywords
            .iter()
            .rev()
            .fold(MovieStore::new(), |s, k| reduce(s, StoreAction::AddQuery(k.to_string())))
    }

    #[test]
    fn test_set_query_replaces_text() {
        let store = reduce(MovieStore::new(), StoreAction::SetQuery("du".to_string()));
        let store = reduce(store, StoreAction::SetQuery("dune".to_string()));
        assert_eq!(store.query, "dune");
        assert!(store.searches.is_empty());
    }

    #[test]
    fn test_add_query_is_newest_first() {
        let store = reduce(MovieStore::new(), StoreAction::AddQuery("dune".to_string()));
        let store = reduce(store, StoreAction::AddQuery("alien".to_string()));
        assert_eq!(store.keywords(), vec!["alien", "dune"]);
    }

    #[test]
    fn test_add_query_evicts_oldest() {
        let mut store = reduce(MovieStore::new(), StoreAction::AddQuery("dune".to_string()));
        for _ in 0..5 {
            store = reduce(store, StoreAction::AddQuery("alien".to_string()));
        }
        assert_eq!(store.searches.len(), 5);
        assert!(!store.keywords().contains(&"dune"));
    }

    #[test]
    fn test_history_never_exceeds_limit_and_keeps_most_recent() {
        let mut store = MovieStore::new();
        for i in 0..23 {
            store = reduce(store, StoreAction::AddQuery(format!("q{}", i)));
            assert!(store.searches.len() <= HISTORY_LIMIT);
        }
        assert_eq!(store.keywords(), vec!["q22", "q21", "q20", "q19", "q18"]);
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let store = with_history(&["a", "a"]);
        assert_ne!(store.searches[0].id, store.searches[1].id);
    }

    #[test]
    fn test_remove_query_preserves_order() {
        let store = with_history(&["e", "d", "c", "b", "a"]);
        let store = reduce(store, StoreAction::RemoveQuery(2));
        assert_eq!(store.keywords(), vec!["e", "d", "b", "a"]);

        let store = reduce(store, StoreAction::RemoveQuery(0));
        assert_eq!(store.keywords(), vec!["d", "b", "a"]);

        let store = reduce(store, StoreAction::RemoveQuery(2));
        assert_eq!(store.keywords(), vec!["d", "b"]);
    }

    #[test]
    fn test_remove_every_position() {
        let original = with_history(&["e", "d", "c", "b", "a"]);
        for i in 0..original.searches.len() {
            let removed = reduce(original.clone(), StoreAction::RemoveQuery(i));
            let mut expected = original.searches.clone();
            expected.remove(i);
            assert_eq!(removed.searches, expected);
        }
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let store = with_history(&["b", "a"]);
        let after = reduce(store.clone(), StoreAction::RemoveQuery(7));
        assert_eq!(after, store);
    }

    #[test]
    fn test_normalized_truncates_oversized_history() {
        let store = MovieStore {
            query: String::new(),
            searches: (0..8).map(|i| SearchHistoryEntry::new(format!("k{}", i))).collect(),
        };
        assert_eq!(store.normalized().searches.len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let store = with_history(&["dune"]);
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["query"], "");
        assert_eq!(json["searches"][0]["keyword"], "dune");
        assert!(json["searches"][0]["id"].is_string());
    }
}
