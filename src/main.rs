use clap::Parser;
use forager::{
    cli::{commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,forager=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Crawl {
            urls,
            url_file,
            base_url,
            limit,
            output,
        } => {
            commands::crawl(&settings, urls, url_file, base_url, limit, &output).await?;
        }
        Commands::Search {
            query,
            mode,
            input,
            max,
        } => {
            commands::search(&settings, &query, mode, input, max)?;
        }
        Commands::Demo { input } => {
            commands::demo(&settings, input)?;
        }
        Commands::Convert { input, output } => {
            commands::convert(&input, &output)?;
        }
        Commands::Stats { input } => {
            commands::stats(&settings, input)?;
        }
    }

    Ok(())
}
