//! Dietary category expansion table.

/// Fixed synonym lists for coarse dietary categories. An unknown category
/// falls back to the literal (lowercased) input as its own singleton list,
/// so arbitrary category strings behave like a one-term general search.
const DIETARY_SYNONYMS: &[(&str, &[&str])] = &[
    ("vegetarian", &["vegetarian", "veggie", "vegetables"]),
    ("seafood", &["salmon", "crab", "halibut", "clam", "fish", "seafood"]),
    ("dessert", &["pie", "cake", "dessert", "sweet", "cobbler", "cream"]),
    ("sauce", &["sauce", "dressing", "vinaigrette"]),
    ("soup", &["soup", "chowder", "broth"]),
    ("appetizer", &["appetizer", "dip", "spread"]),
];

/// Expand a category name into its list of search terms.
pub fn expand_category(category: &str) -> Vec<String> {
    let normalized = category.to_lowercase();

    for (name, terms) in DIETARY_SYNONYMS {
        if *name == normalized {
            return terms.iter().map(|t| t.to_string()).collect();
        }
    }

    vec![normalized]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category() {
        assert_eq!(
            expand_category("seafood"),
            vec!["salmon", "crab", "halibut", "clam", "fish", "seafood"]
        );
    }

    #[test]
    fn test_category_is_case_insensitive() {
        assert_eq!(expand_category("Dessert"), expand_category("dessert"));
    }

    #[test]
    fn test_unknown_category_falls_back_to_literal() {
        assert_eq!(expand_category("Hazelnut"), vec!["hazelnut"]);
    }
}
