//! Corpus interchange: JSON save and CSV conversion. Consumes already
//! materialized recipe records; nothing here touches the indices.

use crate::error::Result;
use crate::store::{CorpusMetadata, Recipe, RecipeFile};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Column order mirrors the flat export consumed by spreadsheet users.
const CSV_COLUMNS: &[&str] = &[
    "title",
    "url",
    "description",
    "category",
    "cuisine",
    "author",
    "prep_time",
    "cook_time",
    "total_time",
    "servings",
    "ingredients_count",
    "instructions_count",
    "ingredients",
    "instructions",
    "image_url",
    "scraped_at",
];

/// Write a `{ metadata, recipes }` JSON corpus readable by `RecipeStore`.
pub fn save_recipes(path: impl AsRef<Path>, recipes: &[Recipe], source: &str) -> Result<()> {
    let path = path.as_ref();

    let file = RecipeFile {
        metadata: Some(CorpusMetadata {
            crawled_at: Utc::now(),
            recipe_count: recipes.len(),
            source: source.to_string(),
        }),
        recipes: recipes.to_vec(),
    };

    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json)?;

    info!("Saved {} recipes to {}", recipes.len(), path.display());
    Ok(())
}

/// Convert recipes to CSV with RFC 4180 quoting. Multi-line fields are
/// pipe-joined into one cell.
pub fn write_csv(path: impl AsRef<Path>, recipes: &[Recipe]) -> Result<()> {
    let path = path.as_ref();

    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');

    for recipe in recipes {
        let row = [
            recipe.title.clone(),
            recipe.url.clone(),
            recipe.description.clone(),
            recipe.category.clone(),
            recipe.cuisine.clone(),
            recipe.author.clone(),
            recipe.prep_time.clone(),
            recipe.cook_time.clone(),
            recipe.total_time.clone(),
            recipe.servings.clone(),
            recipe.ingredients.len().to_string(),
            recipe.instructions.len().to_string(),
            recipe.ingredients.join(" | "),
            recipe.instructions.join(" | "),
            recipe.image_url.clone(),
            recipe.scraped_at.clone(),
        ];

        let cells: Vec<String> = row.iter().map(|cell| escape_csv(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    std::fs::write(path, out)?;

    info!("Wrote {} recipes to {}", recipes.len(), path.display());
    Ok(())
}

fn escape_csv(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecipeStore;

    fn recipe() -> Recipe {
        Recipe {
            title: "Grilled \"King\" Salmon, extra".to_string(),
            ingredients: vec!["2 lb salmon".to_string(), "1 cup white wine".to_string()],
            instructions: vec!["Grill salmon 10 minutes".to_string()],
            url: "https://example.com/salmon".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_round_trips_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");

        save_recipes(&path, &[recipe()], "test").unwrap();

        let store = RecipeStore::from_file(&path);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).title, "Grilled \"King\" Salmon, extra");
    }

    #[test]
    fn test_saved_metadata_carries_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");

        save_recipes(&path, &[recipe()], "unit test").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let file: RecipeFile = serde_json::from_str(&content).unwrap();
        let metadata = file.metadata.unwrap();
        assert_eq!(metadata.recipe_count, 1);
        assert_eq!(metadata.source, "unit test");
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.csv");

        write_csv(&path, &[recipe()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("title,url,description"));
        assert!(header.ends_with("image_url,scraped_at"));

        let row = lines.next().unwrap();
        // Embedded quotes doubled, whole cell quoted because of the comma
        assert!(row.starts_with(r#""Grilled ""King"" Salmon, extra","#));
        assert!(row.contains("2 lb salmon | 1 cup white wine"));
        assert!(row.contains(",2,1,"));
    }

    #[test]
    fn test_csv_of_empty_corpus_is_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
