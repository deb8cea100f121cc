use crate::cli::SearchMode;
use crate::config::Settings;
use crate::crawler::Crawler;
use crate::error::{Error, Result};
use crate::export;
use crate::search::{results, SearchEngine};
use crate::store::{Recipe, RecipeStore};
use std::path::PathBuf;
use tracing::info;

/// Crawl recipes from explicit URLs, a URL file and/or a discovery base
/// page, then save the corpus as JSON.
pub async fn crawl(
    settings: &Settings,
    mut urls: Vec<String>,
    url_file: Option<String>,
    base_url: Option<String>,
    limit: usize,
    output: &str,
) -> Result<()> {
    if let Some(path) = url_file {
        urls.extend(load_urls_from_file(&path)?);
    }

    let crawler = Crawler::new(settings.crawler.clone())?;

    if let Some(base) = base_url {
        let base = url::Url::parse(&base)?;
        let discovered = crawler.discover(base.as_str(), limit).await?;
        info!("Added {} discovered URLs to crawl list", discovered.len());
        urls.extend(discovered);
    }

    if urls.is_empty() {
        return Err(Error::Validation(
            "No URLs provided. Use --urls, --url-file, or --base-url".to_string(),
        ));
    }

    let report = crawler.crawl(&urls).await;
    export::save_recipes(output, &report.recipes, "crawl")?;

    println!("Crawl completed:");
    println!("  Total URLs: {}", report.attempted());
    println!("  Successful: {}", report.successful());
    println!("  Skipped (no recipe data): {}", report.skipped());
    println!("  Failed: {}", report.failed());
    println!("  Success rate: {:.1}%", report.success_rate());
    println!("  Results saved to: {output}");

    Ok(())
}

/// Query a corpus and print the rendered results.
pub fn search(
    settings: &Settings,
    query: &str,
    mode: SearchMode,
    input: Option<String>,
    max: Option<usize>,
) -> Result<()> {
    let engine = load_engine(settings, input);
    let max_results = max.unwrap_or(settings.display.max_results);

    let matches = run_query(&engine, mode, query);

    println!("{}", results::render_results(&matches, max_results));

    Ok(())
}

/// Run the canned showcase searches over a corpus.
pub fn demo(settings: &Settings, input: Option<String>) -> Result<()> {
    let engine = load_engine(settings, input);

    let demos: &[(&str, SearchMode, &str)] = &[
        ("Salmon recipes", SearchMode::General, "salmon"),
        ("Blackberry desserts", SearchMode::General, "blackberry dessert"),
        ("Crab dishes", SearchMode::Ingredient, "crab"),
        ("Baked recipes", SearchMode::Method, "baked"),
        ("Grilled dishes", SearchMode::Method, "grilled"),
        ("Seafood recipes", SearchMode::Dietary, "seafood"),
        ("Dessert recipes", SearchMode::Dietary, "dessert"),
        ("Sauce recipes", SearchMode::Dietary, "sauce"),
        ("Hazelnut recipes", SearchMode::Ingredient, "hazelnut"),
        ("Mousse recipes", SearchMode::Title, "mousse"),
    ];

    println!("=== Demo: search capabilities ===");

    for (description, mode, query) in demos {
        println!("\n--- {description} ---");

        let matches = run_query(&engine, *mode, query);

        if matches.is_empty() {
            println!("No recipes found.");
            continue;
        }

        println!("Found {} recipe(s):", matches.len());
        for (i, recipe) in matches.iter().take(3).enumerate() {
            println!("  {}. {}", i + 1, results::summary(recipe));
        }
        if matches.len() > 3 {
            println!("  ... and {} more", matches.len() - 3);
        }
    }

    Ok(())
}

/// Convert a JSON corpus to CSV.
pub fn convert(input: &str, output: &str) -> Result<()> {
    let store = RecipeStore::from_file(input);

    if store.is_empty() {
        return Err(Error::NotFound(format!("No recipes found in {input}")));
    }

    export::write_csv(output, store.records())?;

    println!("CSV file created: {output}");
    println!("Total recipes: {}", store.len());

    Ok(())
}

/// Print corpus and index statistics. A recipe count of zero is the
/// degraded-load signal operators watch for.
pub fn stats(settings: &Settings, input: Option<String>) -> Result<()> {
    let engine = load_engine(settings, input);

    let (titles, ingredients, instructions, keywords) = engine.index().term_counts();

    println!("Recipes loaded: {}", engine.store().len());
    println!("Distinct terms:");
    println!("  title index:       {titles}");
    println!("  ingredient index:  {ingredients}");
    println!("  instruction index: {instructions}");
    println!("  keyword index:     {keywords}");

    if engine.store().is_empty() {
        println!("Warning: corpus is empty; every query will return no results");
    }

    Ok(())
}

fn run_query<'a>(engine: &'a SearchEngine, mode: SearchMode, query: &str) -> Vec<&'a Recipe> {
    match mode {
        SearchMode::Title => engine.search_by_title(query),
        SearchMode::Ingredient => engine.search_by_ingredient(query),
        SearchMode::Method => engine.search_by_cooking_method(query),
        SearchMode::Dietary => engine
            .search_by_dietary_category(query)
            .into_iter()
            .map(|hit| hit.recipe)
            .collect(),
        SearchMode::General => engine
            .search_general(query)
            .into_iter()
            .map(|hit| hit.recipe)
            .collect(),
    }
}

fn load_engine(settings: &Settings, input: Option<String>) -> SearchEngine {
    let path = input
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.search.corpus_path.clone());

    SearchEngine::new(RecipeStore::from_file(path))
}

fn load_urls_from_file(path: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    info!("Loaded {} URLs from {}", urls.len(), path);
    Ok(urls)
}
