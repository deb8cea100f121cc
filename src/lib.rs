pub mod config;
pub mod error;
pub mod store;

// Crawling pipeline
pub mod crawler;

// In-memory search engine
pub mod search;

// JSON/CSV interchange
pub mod export;

// Command-line interface
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use search::SearchEngine;
pub use store::RecipeStore;
