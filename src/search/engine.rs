//! Query engine over the recipe store and its inverted indices.
//!
//! The engine is built once from a loaded store and is immutable afterwards;
//! every query operation is a pure read. Title, ingredient and
//! cooking-method search intersect postings (every query token must match),
//! general search unions them and ranks by the number of distinct query
//! tokens matched.

use crate::search::index::SearchIndex;
use crate::search::synonyms::expand_category;
use crate::search::tokenizer::tokenize;
use crate::store::{Recipe, RecipeId, RecipeStore};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// A ranked query result: a borrowed record plus the number of distinct
/// query tokens it matched. Kept separate from `Recipe` so scoring never
/// clones or mutates the domain record.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub id: RecipeId,
    pub recipe: &'a Recipe,
    pub score: usize,
}

pub struct SearchEngine {
    store: RecipeStore,
    index: SearchIndex,
}

impl SearchEngine {
    /// Build the engine from a loaded store. Blocking and one-shot: no
    /// query is answerable until this returns.
    pub fn new(store: RecipeStore) -> Self {
        let index = SearchIndex::build(store.records());
        debug!("Search index built over {} recipes", store.len());
        Self { store, index }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Recipes whose title contains every query token.
    pub fn search_by_title(&self, query: &str) -> Vec<&Recipe> {
        self.intersect(query, |index, token| index.title_postings(token))
    }

    /// Recipes whose ingredient lines contain every query token.
    pub fn search_by_ingredient(&self, query: &str) -> Vec<&Recipe> {
        self.intersect(query, |index, token| index.ingredient_postings(token))
    }

    /// Recipes matching every query token in either the title or the
    /// instructions ("baked", "grilled", ...).
    pub fn search_by_cooking_method(&self, query: &str) -> Vec<&Recipe> {
        self.intersect(query, |index, token| {
            let mut ids = index.title_postings(token);
            ids.extend(index.instruction_postings(token));
            ids
        })
    }

    /// Ranked search across the keyword index. A recipe qualifies by
    /// matching at least one query token; its score is the number of
    /// distinct query tokens it matched. Results are sorted by descending
    /// score, ties in ascending-id order.
    pub fn search_general(&self, query: &str) -> Vec<SearchHit<'_>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        // BTreeMap keys the accumulation by ascending id, so the stable
        // sort below leaves equal scores in id order.
        let mut scores: BTreeMap<RecipeId, usize> = BTreeMap::new();
        for token in &tokens {
            for id in self.index.keyword_postings(token) {
                *scores.entry(id).or_insert(0) += 1;
            }
        }

        let mut hits: Vec<SearchHit<'_>> = scores
            .into_iter()
            .map(|(id, score)| SearchHit {
                id,
                recipe: self.store.get(id),
                score,
            })
            .collect();

        hits.sort_by_key(|hit| Reverse(hit.score));
        hits
    }

    /// Expand a dietary category ("seafood", "dessert", ...) into its
    /// synonym terms and union the general-search results, deduplicated by
    /// id in first-encounter order. A recipe reached through several
    /// synonyms keeps its highest score.
    pub fn search_by_dietary_category(&self, category: &str) -> Vec<SearchHit<'_>> {
        if tokenize(category).is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = Vec::new();
        let mut positions: HashMap<RecipeId, usize> = HashMap::new();

        for term in expand_category(category) {
            for hit in self.search_general(&term) {
                match positions.get(&hit.id) {
                    Some(&pos) => {
                        if hit.score > hits[pos].score {
                            hits[pos].score = hit.score;
                        }
                    }
                    None => {
                        positions.insert(hit.id, hits.len());
                        hits.push(hit);
                    }
                }
            }
        }

        hits
    }

    fn intersect<F>(&self, query: &str, postings: F) -> Vec<&Recipe>
    where
        F: Fn(&SearchIndex, &str) -> BTreeSet<RecipeId>,
    {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut candidates: Option<BTreeSet<RecipeId>> = None;
        for token in &tokens {
            let ids = postings(&self.index, token);
            candidates = Some(match candidates {
                // The first token seeds the candidate set; once it is
                // empty, later tokens cannot revive it.
                None => ids,
                Some(current) => current.intersection(&ids).copied().collect(),
            });
        }

        candidates
            .unwrap_or_default()
            .into_iter()
            .map(|id| self.store.get(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        let recipes = vec![
            Recipe {
                title: "Grilled King Salmon".to_string(),
                ingredients: vec!["2 lb salmon".to_string(), "1 cup white wine".to_string()],
                instructions: vec!["Grill salmon 10 minutes".to_string()],
                ..Default::default()
            },
            Recipe {
                title: "Blackberry Cobbler".to_string(),
                ingredients: vec!["2 cups blackberries".to_string(), "1 cup flour".to_string()],
                instructions: vec!["Bake cobbler 45 minutes".to_string()],
                ..Default::default()
            },
        ];
        SearchEngine::new(RecipeStore::from_records(recipes))
    }

    fn titles<'a>(results: &[&'a Recipe]) -> Vec<&'a str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_title_search_single_token() {
        let engine = engine();
        assert_eq!(titles(&engine.search_by_title("salmon")), vec!["Grilled King Salmon"]);
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let engine = engine();
        assert_eq!(
            titles(&engine.search_by_title("SALMON")),
            titles(&engine.search_by_title("salmon"))
        );
    }

    #[test]
    fn test_title_search_requires_all_tokens() {
        let engine = engine();
        assert_eq!(engine.search_by_title("grilled king").len(), 1);
        // "grilled" matches recipe 0, "cobbler" matches recipe 1; the
        // intersection is empty
        assert!(engine.search_by_title("grilled cobbler").is_empty());
    }

    #[test]
    fn test_intersection_short_circuits_on_first_token() {
        let engine = engine();
        // First token unknown: the candidate set starts empty and stays
        // empty no matter what follows
        assert!(engine.search_by_title("zzzznotaword salmon").is_empty());
    }

    #[test]
    fn test_ingredient_search() {
        let engine = engine();
        assert_eq!(titles(&engine.search_by_ingredient("salmon")), vec!["Grilled King Salmon"]);
        assert_eq!(titles(&engine.search_by_ingredient("flour")), vec!["Blackberry Cobbler"]);
        assert!(engine.search_by_ingredient("hazelnut").is_empty());
    }

    #[test]
    fn test_cooking_method_matches_title_or_instructions() {
        let engine = engine();
        // "grilled" only appears in the title
        assert_eq!(titles(&engine.search_by_cooking_method("grilled")), vec!["Grilled King Salmon"]);
        // "bake" only appears in the instructions
        assert_eq!(titles(&engine.search_by_cooking_method("bake")), vec!["Blackberry Cobbler"]);
        // no stemming: "baked" is not "bake"
        assert!(engine.search_by_cooking_method("baked").is_empty());
    }

    #[test]
    fn test_general_search_scores_distinct_tokens() {
        let engine = engine();
        let hits = engine.search_general("salmon wine");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe.title, "Grilled King Salmon");
        assert_eq!(hits[0].score, 2);
    }

    #[test]
    fn test_general_search_is_or_ranked() {
        let engine = engine();
        // "cup" matches both recipes, "salmon" only the first: the salmon
        // recipe scores 2 and sorts first
        let hits = engine.search_general("salmon cup");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].recipe.title, "Grilled King Salmon");
        assert_eq!(hits[0].score, 2);
        assert_eq!(hits[1].recipe.title, "Blackberry Cobbler");
        assert_eq!(hits[1].score, 1);
    }

    #[test]
    fn test_general_search_repeated_word_counts_once() {
        let engine = engine();
        // "salmon" occurs in title, ingredients and instructions of recipe
        // 0 but is one distinct query token
        let hits = engine.search_general("salmon");
        assert_eq!(hits[0].score, 1);
    }

    #[test]
    fn test_general_search_ignores_unknown_tokens() {
        let engine = engine();
        let with_noise = engine.search_general("salmon zzzznotaword");
        let without = engine.search_general("salmon");
        let ids_with: Vec<_> = with_noise.iter().map(|h| h.id).collect();
        let ids_without: Vec<_> = without.iter().map(|h| h.id).collect();
        assert_eq!(ids_with, ids_without);
    }

    #[test]
    fn test_general_search_ties_keep_id_order() {
        let engine = engine();
        let hits = engine.search_general("cup");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].id < hits[1].id);
    }

    #[test]
    fn test_dietary_expansion_reaches_synonyms() {
        let engine = engine();
        // No recipe contains the literal word "seafood"; "salmon" is in
        // the synonym list
        let hits = engine.search_by_dietary_category("seafood");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe.title, "Grilled King Salmon");

        let hits = engine.search_by_dietary_category("dessert");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe.title, "Blackberry Cobbler");
    }

    #[test]
    fn test_dietary_unknown_category_uses_literal_term() {
        let engine = engine();
        let hits = engine.search_by_dietary_category("blackberries");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe.title, "Blackberry Cobbler");

        assert!(engine.search_by_dietary_category("molecular").is_empty());
    }

    #[test]
    fn test_empty_and_punctuation_queries_return_nothing() {
        let engine = engine();
        assert!(engine.search_by_title("").is_empty());
        assert!(engine.search_by_ingredient("!!!").is_empty());
        assert!(engine.search_by_cooking_method("").is_empty());
        assert!(engine.search_general("...").is_empty());
        assert!(engine.search_by_dietary_category("").is_empty());
    }

    #[test]
    fn test_empty_store_returns_empty_results() {
        let engine = SearchEngine::new(RecipeStore::from_records(vec![]));
        assert!(engine.search_by_title("salmon").is_empty());
        assert!(engine.search_general("salmon").is_empty());
        assert!(engine.search_by_dietary_category("seafood").is_empty());
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        let engine = engine();
        let first: Vec<_> = engine.search_general("salmon cup").iter().map(|h| (h.id, h.score)).collect();
        let second: Vec<_> = engine.search_general("salmon cup").iter().map(|h| (h.id, h.score)).collect();
        assert_eq!(first, second);
    }
}
