//! Recipe URL discovery and classification.
//!
//! Category pages link to a mix of recipes, navigation, pagination and
//! social widgets. Classification is two-staged: a skip list rejects
//! obvious non-content, then path patterns plus a slug check admit likely
//! recipe pages.

use regex::Regex;
use url::Url;

/// Path fragments that mark a URL as a probable recipe page.
const RECIPE_PATH_PATTERNS: &[&str] = &[
    "/recipe/",
    "/recipes/",
    "/food/recipes/",
    "/cooking/recipe/",
    "/dish/",
    "/meal/",
];

/// Substrings that disqualify a URL outright.
const SKIP_PATTERNS: &[&str] = &[
    "/authentication/",
    "/account/",
    "/login",
    "/signup",
    "/settings",
    "/favorites",
    "/add-recipe",
    "/admin/",
    "/api/",
    "/search?",
    "#",
    "javascript:",
    "mailto:",
    "tel:",
    "pinterest.com",
    "facebook.com",
    "twitter.com",
    "yummly.com",
];

/// Non-content destinations excluded from the crawl queue.
const NON_CONTENT_PATTERNS: &[&str] = &[
    "/admin/",
    "/api/",
    "/login",
    "/signup",
    "/cart",
    "/checkout",
    "/search?",
    "#",
    "javascript:",
    "mailto:",
    "tel:",
];

const BINARY_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".zip", ".rar",
];

/// Is this URL likely an individual recipe page?
pub fn is_recipe_url(url: &str) -> bool {
    let url_lower = url.to_lowercase();

    if SKIP_PATTERNS.iter().any(|p| url_lower.contains(p)) {
        return false;
    }

    RECIPE_PATH_PATTERNS
        .iter()
        .any(|p| url_lower.contains(p))
        && has_recipe_slug(&url_lower)
}

/// Require a plausible identifier after the recipe-ish path segment so
/// listing pages like `/recipes/` alone do not qualify.
fn has_recipe_slug(url_lower: &str) -> bool {
    let id_re = Regex::new(r"/recipes?/\d+").unwrap();
    if id_re.is_match(url_lower) {
        return true;
    }

    let slug_re = Regex::new(r"^[a-z0-9-]+$").unwrap();
    let segments: Vec<&str> = url_lower.split('/').collect();

    for (i, segment) in segments.iter().enumerate() {
        if matches!(*segment, "recipe" | "recipes" | "food" | "cooking" | "dish" | "meal") {
            if let Some(next) = segments.get(i + 1) {
                if next.len() > 2
                    && slug_re.is_match(next)
                    && !matches!(*next, "add" | "edit" | "delete" | "list" | "search")
                {
                    return true;
                }
            }
        }
    }

    false
}

/// Is this URL worth visiting while looking for more links?
pub fn is_content_page(url: &str) -> bool {
    let url_lower = url.to_lowercase();

    if NON_CONTENT_PATTERNS.iter().any(|p| url_lower.contains(p)) {
        return false;
    }

    !BINARY_EXTENSIONS.iter().any(|ext| url_lower.ends_with(ext))
}

pub fn same_domain(url: &str, base_url: &str) -> bool {
    match (Url::parse(url), Url::parse(base_url)) {
        (Ok(a), Ok(b)) => a.host_str().is_some() && a.host_str() == b.host_str(),
        _ => false,
    }
}

/// Extract every anchor href from a page, absolutized against the page
/// URL, http(s) only, deduplicated in order of first appearance.
pub fn discover_links(page_url: &str, html: &str) -> Vec<String> {
    let href_re = Regex::new(r#"(?i)<a[^>]+href\s*=\s*["']([^"'<>]+)["']"#).unwrap();

    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(_) => return Vec::new(),
    };

    let mut seen = std::collections::HashSet::new();
    let mut links = Vec::new();

    for cap in href_re.captures_iter(html) {
        let href = cap[1].trim();

        let absolute = match base.join(href) {
            Ok(url) => url,
            Err(_) => continue,
        };

        if !matches!(absolute.scheme(), "http" | "https") {
            continue;
        }

        let url = absolute.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}
