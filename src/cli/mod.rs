// Command-line interface definitions; handlers live in commands.rs

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "forager")]
#[command(about = "Forager - recipe crawler and in-memory search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl recipe pages and save the extracted recipes as a JSON corpus
    Crawl {
        /// Recipe URLs to crawl
        #[arg(long, num_args = 1..)]
        urls: Vec<String>,

        /// File containing URLs, one per line (# starts a comment)
        #[arg(long)]
        url_file: Option<String>,

        /// Category page to discover recipe URLs from
        #[arg(long)]
        base_url: Option<String>,

        /// Maximum recipe URLs to discover from the base page
        #[arg(long, default_value_t = 100)]
        limit: usize,

        /// Output JSON file
        #[arg(short, long, default_value = "crawl_results.json")]
        output: String,
    },

    /// Query a recipe corpus
    Search {
        /// Search query
        query: String,

        /// Which index to query
        #[arg(long, value_enum, default_value_t = SearchMode::General)]
        mode: SearchMode,

        /// JSON corpus path (defaults to CORPUS_PATH)
        #[arg(short, long)]
        input: Option<String>,

        /// Maximum results to display
        #[arg(long)]
        max: Option<usize>,
    },

    /// Run showcase searches against a corpus
    Demo {
        /// JSON corpus path (defaults to CORPUS_PATH)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Convert a JSON corpus to CSV
    Convert {
        /// Input JSON corpus
        #[arg(short, long)]
        input: String,

        /// Output CSV file
        #[arg(short, long)]
        output: String,
    },

    /// Show corpus and index statistics
    Stats {
        /// JSON corpus path (defaults to CORPUS_PATH)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// All query words must appear in the title
    Title,
    /// All query words must appear in the ingredient lines
    Ingredient,
    /// All query words must appear in the title or the instructions
    Method,
    /// Expand a dietary category (seafood, dessert, ...) into synonyms
    Dietary,
    /// Ranked search across all indexed fields
    General,
}
