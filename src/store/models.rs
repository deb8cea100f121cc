use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scraped dish. All text fields default to empty when absent so that
/// loading never fails on a sparse record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub author: String,

    // Passthrough fields, carried for display and export but never indexed
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub total_time: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub scraped_at: String,
}

/// On-disk corpus shape: `{ "recipes": [...] }`, optionally with metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeFile {
    #[serde(default)]
    pub metadata: Option<CorpusMetadata>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusMetadata {
    pub crawled_at: DateTime<Utc>,
    pub recipe_count: usize,
    #[serde(default)]
    pub source: String,
}
