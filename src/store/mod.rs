pub mod models;

pub use models::{CorpusMetadata, Recipe, RecipeFile};

use std::path::Path;
use tracing::{info, warn};

/// Position of a recipe in the store, assigned at load time. Ids are only
/// ever produced by the search indices, so they are valid by construction.
pub type RecipeId = usize;

/// Ordered, immutable-after-load collection of recipes.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    pub fn from_records(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Load a `{ "recipes": [...] }` JSON corpus. A missing or malformed
    /// file degrades to an empty store rather than failing the engine; the
    /// loaded count is logged so operators can spot the degraded state.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let recipes = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<RecipeFile>(&content) {
                Ok(file) => file.recipes,
                Err(e) => {
                    warn!("Failed to parse recipe corpus {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("Failed to read recipe corpus {}: {}", path.display(), e);
                Vec::new()
            }
        };

        info!("Loaded {} recipes from {}", recipes.len(), path.display());

        Self { recipes }
    }

    /// Fetch a record by id. Ids originate from the engine's own indices,
    /// so an out-of-range id is a defect and panics.
    pub fn get(&self, id: RecipeId) -> &Recipe {
        &self.recipes[id]
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn records(&self) -> &[Recipe] {
        &self.recipes
    }
}
