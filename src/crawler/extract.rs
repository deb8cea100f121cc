//! JSON-LD recipe extraction.
//!
//! Recipe pages carry their structured data in
//! `<script type="application/ld+json">` blocks, either as a top-level
//! `Recipe` object, inside a `@graph` array, or with `@type` given as an
//! array. A page without a parseable `Recipe` object simply yields nothing.

use crate::store::Recipe;
use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Pull the first schema.org `Recipe` out of a page, if any.
pub fn extract_recipe(html: &str, source_url: &str) -> Option<Recipe> {
    for block in jsonld_blocks(html) {
        let value: Value = match serde_json::from_str(&block) {
            Ok(value) => value,
            Err(e) => {
                debug!("Skipping malformed JSON-LD block on {}: {}", source_url, e);
                continue;
            }
        };

        if let Some(object) = find_recipe_object(&value) {
            return Some(map_recipe(object, source_url));
        }
    }

    None
}

fn jsonld_blocks(html: &str) -> Vec<String> {
    let script_re =
        Regex::new(r#"(?si)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
            .unwrap();

    script_re
        .captures_iter(html)
        .map(|cap| cap[1].trim().to_string())
        .collect()
}

fn is_recipe_type(object: &Value) -> bool {
    match object.get("@type") {
        Some(Value::String(t)) => t == "Recipe",
        Some(Value::Array(types)) => types.iter().any(|t| t == "Recipe"),
        _ => false,
    }
}

fn find_recipe_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if is_recipe_type(value) {
                return Some(value);
            }
            if let Some(Value::Array(graph)) = map.get("@graph") {
                return graph.iter().find(|item| is_recipe_type(item));
            }
            None
        }
        Value::Array(items) => items.iter().find_map(find_recipe_object),
        _ => None,
    }
}

fn map_recipe(object: &Value, source_url: &str) -> Recipe {
    Recipe {
        title: text_field(object.get("name")),
        ingredients: text_lines(object.get("recipeIngredient")),
        instructions: instruction_lines(object.get("recipeInstructions")),
        description: text_field(object.get("description")),
        category: text_field(object.get("recipeCategory")),
        cuisine: text_field(object.get("recipeCuisine")),
        author: author_name(object.get("author")),
        url: source_url.to_string(),
        image_url: image_url(object.get("image")),
        prep_time: text_field(object.get("prepTime")),
        cook_time: text_field(object.get("cookTime")),
        total_time: text_field(object.get("totalTime")),
        servings: text_field(object.get("recipeYield")),
        scraped_at: Utc::now().to_rfc3339(),
    }
}

/// Strip embedded HTML (sites routinely nest `<p>` or `<br>` in JSON-LD
/// text), decode the basic entities and collapse whitespace.
fn clean_text(text: &str) -> String {
    let stripped = ammonia::Builder::empty().clean(text).to_string();

    stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A text-ish scalar: string, number, or the first element of an array of
/// them (schema.org allows all three for most fields).
fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => clean_text(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(|item| match item {
                Value::String(s) => Some(clean_text(s)),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn text_lines(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(clean_text(s)),
                _ => None,
            })
            .filter(|line| !line.is_empty())
            .collect(),
        Some(Value::String(s)) => {
            let line = clean_text(s);
            if line.is_empty() {
                Vec::new()
            } else {
                vec![line]
            }
        }
        _ => Vec::new(),
    }
}

/// Instructions appear as plain strings, `HowToStep` objects, or
/// `HowToSection` objects wrapping a list of steps.
fn instruction_lines(value: Option<&Value>) -> Vec<String> {
    let mut lines = Vec::new();

    match value {
        Some(Value::String(s)) => {
            let line = clean_text(s);
            if !line.is_empty() {
                lines.push(line);
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                collect_instruction(item, &mut lines);
            }
        }
        Some(object @ Value::Object(_)) => collect_instruction(object, &mut lines),
        _ => {}
    }

    lines
}

fn collect_instruction(item: &Value, lines: &mut Vec<String>) {
    match item {
        Value::String(s) => {
            let line = clean_text(s);
            if !line.is_empty() {
                lines.push(line);
            }
        }
        Value::Object(map) => {
            if let Some(Value::Array(steps)) = map.get("itemListElement") {
                for step in steps {
                    collect_instruction(step, lines);
                }
            } else if let Some(Value::String(text)) = map.get("text") {
                let line = clean_text(text);
                if !line.is_empty() {
                    lines.push(line);
                }
            }
        }
        _ => {}
    }
}

/// Author is a string, a Person object, or an array of either.
fn author_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => clean_text(s),
        Some(Value::Object(map)) => text_field(map.get("name")),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| author_name(Some(item)))
            .find(|name| !name.is_empty())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Image is a URL string, an array of them, or an ImageObject.
fn image_url(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Object(map)) => match map.get("url") {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => String::new(),
        },
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| image_url(Some(item)))
            .find(|url| !url.is_empty())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
