//! Inverted indices over the recipe store.
//!
//! Four token -> id-set maps are built in a single pass and never mutated
//! afterwards; refreshing the corpus means building a new index. `BTreeSet`
//! postings give a deterministic ascending-id iteration order, which keeps
//! query results stable for a fixed corpus.

use crate::search::tokenizer::tokenize;
use crate::store::{Recipe, RecipeId};
use std::collections::{BTreeSet, HashMap};

type Postings = HashMap<String, BTreeSet<RecipeId>>;

#[derive(Debug, Default)]
pub struct SearchIndex {
    title: Postings,
    ingredient: Postings,
    instruction: Postings,
    /// Everything index: ingredients, instructions, description, category,
    /// cuisine and author. Used by general ranked search.
    keyword: Postings,
}

fn index_text(postings: &mut Postings, text: &str, id: RecipeId) {
    for token in tokenize(text) {
        postings.entry(token).or_default().insert(id);
    }
}

impl SearchIndex {
    /// Build all four indices in one pass. Total for any textual input:
    /// empty fields simply contribute nothing.
    pub fn build(recipes: &[Recipe]) -> Self {
        let mut index = SearchIndex::default();

        for (id, recipe) in recipes.iter().enumerate() {
            index_text(&mut index.title, &recipe.title, id);

            for line in &recipe.ingredients {
                index_text(&mut index.ingredient, line, id);
                index_text(&mut index.keyword, line, id);
            }

            for line in &recipe.instructions {
                index_text(&mut index.instruction, line, id);
                index_text(&mut index.keyword, line, id);
            }

            for field in [
                &recipe.description,
                &recipe.category,
                &recipe.cuisine,
                &recipe.author,
            ] {
                index_text(&mut index.keyword, field, id);
            }
        }

        index
    }

    /// Ids whose title contains `token`. Absent tokens yield an empty set.
    pub fn title_postings(&self, token: &str) -> BTreeSet<RecipeId> {
        self.title.get(token).cloned().unwrap_or_default()
    }

    pub fn ingredient_postings(&self, token: &str) -> BTreeSet<RecipeId> {
        self.ingredient.get(token).cloned().unwrap_or_default()
    }

    pub fn instruction_postings(&self, token: &str) -> BTreeSet<RecipeId> {
        self.instruction.get(token).cloned().unwrap_or_default()
    }

    pub fn keyword_postings(&self, token: &str) -> BTreeSet<RecipeId> {
        self.keyword.get(token).cloned().unwrap_or_default()
    }

    /// Distinct term counts per index, in (title, ingredient, instruction,
    /// keyword) order. Surfaced by the stats command.
    pub fn term_counts(&self) -> (usize, usize, usize, usize) {
        (
            self.title.len(),
            self.ingredient.len(),
            self.instruction.len(),
            self.keyword.len(),
        )
    }
}
