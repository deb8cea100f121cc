//! In-memory recipe search: tokenizer, inverted indices and the query
//! engine, plus a swappable handle for lock-free concurrent reads.

pub mod engine;
pub mod index;
pub mod results;
pub mod synonyms;
pub mod tokenizer;

pub use engine::{SearchEngine, SearchHit};
pub use index::SearchIndex;

use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to an immutable engine. Readers take an `Arc` snapshot and
/// query without locking; a rebuild constructs a fresh engine and swaps the
/// reference, leaving in-flight readers on the old snapshot. Indices are
/// never mutated in place.
pub struct SharedEngine {
    inner: RwLock<Arc<SearchEngine>>,
}

impl SharedEngine {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            inner: RwLock::new(Arc::new(engine)),
        }
    }

    pub fn snapshot(&self) -> Arc<SearchEngine> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically replace the engine with a freshly built one.
    pub fn swap(&self, engine: SearchEngine) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(engine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Recipe, RecipeStore};

    fn engine_with(title: &str) -> SearchEngine {
        let recipe = Recipe {
            title: title.to_string(),
            ..Default::default()
        };
        SearchEngine::new(RecipeStore::from_records(vec![recipe]))
    }

    #[test]
    fn test_snapshot_reads_current_engine() {
        let shared = SharedEngine::new(engine_with("Clam Chowder"));
        assert_eq!(shared.snapshot().search_by_title("chowder").len(), 1);
    }

    #[test]
    fn test_swap_replaces_engine_for_new_readers() {
        let shared = SharedEngine::new(engine_with("Clam Chowder"));
        let old = shared.snapshot();

        shared.swap(engine_with("Berry Pie"));

        // New snapshots see the new corpus
        assert!(shared.snapshot().search_by_title("chowder").is_empty());
        assert_eq!(shared.snapshot().search_by_title("pie").len(), 1);

        // In-flight readers keep the old one
        assert_eq!(old.search_by_title("chowder").len(), 1);
    }
}
