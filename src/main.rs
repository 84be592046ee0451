//! searx-client CLI - resilient search against public instances.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use searx_client::{Search, SearchConfig, SearchQuery, TimeRange};

/// Resilient scraping search client for public SearXNG-style instances
#[derive(Parser)]
#[command(name = "searx-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search query
    query: String,

    /// Time range filter (day, week, month, year)
    #[arg(short, long)]
    time_range: Option<String>,

    /// Language code (e.g. en, de)
    #[arg(short, long)]
    language: Option<String>,

    /// Page number (standard mode only)
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Aggregate results across several instances and pages
    #[arg(short, long)]
    detailed: bool,

    /// Semicolon-delimited instance list (overrides SEARX_INSTANCES)
    #[arg(short, long)]
    instances: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Maximum number of results to display (text format only)
    #[arg(long, default_value = "10")]
    limit: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// JSON array of {url, summary} objects
    Json,
    /// Human-readable text output
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let mut config = SearchConfig::from_env();
    if let Some(list) = &cli.instances {
        config = config.with_instance_list(list);
    }
    config.validate()?;

    let mut query = SearchQuery::new(&cli.query)
        .with_page(cli.page)
        .with_detailed(cli.detailed);
    if let Some(range) = &cli.time_range {
        query = query.with_time_range(range.parse::<TimeRange>()?);
    }
    if let Some(language) = &cli.language {
        query = query.with_language(language);
    }

    let search = Search::new(config);
    let results = search.execute(&query).await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&results)?);
        }
        OutputFormat::Text => {
            println!(
                "\nSearch results for \"{}\" ({} results):\n",
                cli.query,
                results.len()
            );
            for (i, result) in results.iter().take(cli.limit).enumerate() {
                println!("{}. {}", i + 1, result.url);
                println!("   {}", result.summary);
                println!();
            }
        }
    }

    Ok(())
}
