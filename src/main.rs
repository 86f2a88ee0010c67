//! googly CLI - crawl several search engines and print the merged results.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use googly::{engines::EngineRegistry, PageLimit, Search, SearchOptions, SearchResults, TimeRange};

/// googly - Multi-engine web search crawler
#[derive(Parser)]
#[command(name = "googly")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search query
    #[arg(short, long, required_unless_present = "list_engines")]
    query: Option<String>,

    /// Search engines to use (comma-separated names or shortcuts)
    #[arg(short, long, value_delimiter = ',', default_value = "google")]
    engines: Vec<String>,

    /// Language code passed to every engine
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Result pages to fetch per engine (-1 for unlimited)
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    pages: i64,

    /// Relative time range: any, hour, day, week, month, year
    #[arg(short, long, default_value = "any")]
    time_range: TimeRange,

    /// Only results after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Only results before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Fixed user agent instead of a generated one
    #[arg(short, long)]
    user_agent: Option<String>,

    /// Per-engine crawl deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// List available search engines and exit
    #[arg(long)]
    list_engines: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
    /// XML document
    Xml,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.list_engines {
        list_engines();
        return Ok(());
    }

    run_search(cli).await
}

fn list_engines() {
    println!("Available search engines:\n");
    for engine in EngineRegistry::global().engines() {
        println!("  {:<10} - {}", engine.shortcut(), engine.name());
    }
    println!();
    println!("Usage: googly -q \"query\" -e google,ddg,yahoo");
}

async fn run_search(cli: Cli) -> Result<()> {
    let query = cli.query.context("a query is required")?;

    let mut options = SearchOptions::new()
        .with_lang(cli.lang)
        .with_pages(PageLimit::from_raw(cli.pages))
        .with_time_range(cli.time_range)
        .with_verbose(cli.verbose);
    if let Some(from) = cli.from {
        options = options.with_from(from);
    }
    if let Some(to) = cli.to {
        options = options.with_to(to);
    }
    if let Some(ua) = cli.user_agent {
        options = options.with_user_agent(ua);
    }

    let mut search = Search::new().context("failed to build HTTP client")?;
    if let Some(secs) = cli.timeout {
        search.set_timeout(Duration::from_secs(secs));
    }

    let engines: Vec<String> = cli
        .engines
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect();

    let results = search.search(&query, &options, &engines).await?;

    for failure in results.failures() {
        match failure.status {
            Some(status) => eprintln!("{}: status code {}", failure.engine, status),
            None => eprintln!("{}: failed", failure.engine),
        }
        if cli.verbose {
            eprintln!("  {}", failure.message);
        }
    }

    print_results(&results, cli.format)?;

    if results.failures().len() == engines.len() {
        bail!("all {} engines failed", engines.len());
    }
    Ok(())
}

fn print_results(results: &SearchResults, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, result) in results.items().iter().enumerate() {
                println!("[ {} ] {}", i + 1, result.title);
                println!("{}", result.description);
                println!("{}", result.link);
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results.items())?);
        }
        OutputFormat::Compact => {
            for result in results.items() {
                println!("{}\t{}", result.title, result.link);
            }
        }
        OutputFormat::Xml => {
            println!("{}", results.to_xml()?);
        }
    }
    Ok(())
}
