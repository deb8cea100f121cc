//! Word-boundary tokenizer shared by index construction and queries.

/// Tokenize text into search terms: lowercase, then split into maximal runs
/// of alphanumeric characters. No stemming, no stop words. Empty or
/// punctuation-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
