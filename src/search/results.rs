//! Display helpers over already-computed query results. Pure formatting,
//! not part of the index's correctness surface.

use crate::store::Recipe;
use std::fmt::Write;

/// Brief one-line summary of a recipe: title plus whatever counts and
/// timings the record actually carries.
pub fn summary(recipe: &Recipe) -> String {
    let title = if recipe.title.is_empty() {
        "No title"
    } else {
        &recipe.title
    };

    let mut out = format!("'{title}'");

    if !recipe.ingredients.is_empty() {
        let _ = write!(out, " - {} ingredients", recipe.ingredients.len());
    }
    if !recipe.instructions.is_empty() {
        let _ = write!(out, ", {} steps", recipe.instructions.len());
    }
    if !recipe.servings.is_empty() {
        let _ = write!(out, ", serves {}", recipe.servings);
    }
    if !recipe.prep_time.is_empty() {
        let _ = write!(out, ", prep: {}", recipe.prep_time);
    }

    out
}

/// Render a capped result listing: numbered summaries, a preview of the
/// first three ingredients and a trailer for anything past the cap.
pub fn render_results(results: &[&Recipe], max_results: usize) -> String {
    if results.is_empty() {
        return "No recipes found matching your search.".to_string();
    }

    let mut out = format!("Found {} recipe(s):\n", results.len());
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for (i, recipe) in results.iter().take(max_results).enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, summary(recipe));

        if !recipe.ingredients.is_empty() {
            let preview: Vec<&str> = recipe
                .ingredients
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "   Ingredients: {}", preview.join(", "));
            if recipe.ingredients.len() > 3 {
                let _ = writeln!(out, "   ... and {} more", recipe.ingredients.len() - 3);
            }
        }

        if !recipe.url.is_empty() {
            let _ = writeln!(out, "   URL: {}", recipe.url);
        }
    }

    if results.len() > max_results {
        let _ = writeln!(out, "... and {} more results", results.len() - max_results);
    }

    out
}
