use anyhow::{Context, Result};
use auction_scout::classify::{classify_status, extract_quantity, is_ending_soon, is_excluded};
use auction_scout::config::{Config, DEFAULT_KEYWORDS};
use auction_scout::export::{save_listings, CsvWorkbook};
use auction_scout::pipeline::{process_results, Passthrough, ProcessOptions};
use auction_scout::runner::{collect_pages, RunSummary, PAGE_DELAY};
use auction_scout::scrapers::{SearchParams, YahooScraper};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "auction-scout")]
#[command(about = "Yahoo! Auctions listing scraper and exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch search results and save one raw CSV per keyword
    Scrape {
        /// Search query; repeat for several. Defaults to the built-in list
        #[arg(long = "keyword", short)]
        keywords: Vec<String>,

        /// Stop after this many pages per keyword
        #[arg(long)]
        max_pages: Option<u32>,

        /// Use configured proxies without checking them first
        #[arg(long)]
        skip_proxy_check: bool,

        /// Also write each keyword's listings as pretty JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter, classify and export every raw CSV in the results directory
    Process {
        /// Date (YYYY-MM-DD) to put in the "added" column instead of now
        #[arg(long)]
        date: Option<String>,
    },

    /// Fetch one item page and show what the classifiers make of it
    Item { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Scrape {
            keywords,
            max_pages,
            skip_proxy_check,
            json,
        } => scrape(&config, keywords, max_pages, skip_proxy_check, json).await,
        Commands::Process { date } => process(&config, date.as_deref()),
        Commands::Item { id } => item(&config, &id).await,
    }
}

async fn scrape(
    config: &Config,
    keywords: Vec<String>,
    max_pages: Option<u32>,
    skip_proxy_check: bool,
    json: bool,
) -> Result<()> {
    info!("🔨 Auction Scout - Yahoo! Auctions");
    info!("==================================");

    let mut scraper = YahooScraper::new(config)?;
    if !config.proxies.is_empty() && !skip_proxy_check {
        let working = scraper.check_routes().await?;
        info!("{} working proxies", working);
    }

    if config.debug_mode && config.debug_dir.exists() {
        tokio::fs::remove_dir_all(&config.debug_dir)
            .await
            .with_context(|| format!("Failed to clear {}", config.debug_dir.display()))?;
    }

    let keywords = if keywords.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
    } else {
        keywords
    };

    for query in &keywords {
        info!("=== Searching: {} ===", query);
        let extraction = collect_pages(&scraper, &SearchParams::new(query.as_str()), max_pages, PAGE_DELAY).await;

        let Some(summary) = RunSummary::of(&extraction) else {
            warn!("No listings found for {}", query);
            continue;
        };
        summary.log();

        let path = save_listings(&config.results_dir, query, &extraction.listings)?;
        if json {
            let json_path = path.with_extension("json");
            let body = serde_json::to_string_pretty(&extraction.listings)?;
            tokio::fs::write(&json_path, body).await?;
            info!("💾 Saved JSON to {}", json_path.display());
        }
    }

    Ok(())
}

fn process(config: &Config, date: Option<&str>) -> Result<()> {
    let added_at = match date {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date {:?}, expected YYYY-MM-DD", date))?
            .format("%Y-%m-%d 00:00")
            .to_string(),
        None => Local::now().format("%Y-%m-%d %H:%M").to_string(),
    };

    let mut workbook = CsvWorkbook::create(&config.sheets_dir, Local::now())?;
    info!("Created workbook {}", workbook.dir().display());

    let options = ProcessOptions {
        results_dir: config.results_dir.clone(),
        archive_dir: config.archive_dir.clone(),
        yen_per_eur: config.yen_to_eur,
        added_at,
    };
    let summary = process_results(&options, &Passthrough, &mut workbook)?;

    info!("✅ Processed {} files, {} rows", summary.files, summary.rows);
    for failed in &summary.failed {
        warn!("Not processed: {}", failed.display());
    }
    Ok(())
}

async fn item(config: &Config, id: &str) -> Result<()> {
    let scraper = YahooScraper::new(config)?;
    let Some((listing, diagnostics)) = scraper.item_details(id).await? else {
        anyhow::bail!("No listing found on the page for {}", id);
    };
    for diagnostic in &diagnostics {
        warn!("Listing {}: {}", diagnostic.listing_id, diagnostic.error);
    }

    println!("{} ({}円)", listing.title, listing.price);
    println!("   ID: {}", listing.id);
    println!("   Bids: {}", listing.bid_count);
    println!("   Ends: {} (ending soon: {})", listing.end_time_text, is_ending_soon(&listing.end_time_text));
    println!("   Seller: {} {}", listing.seller_name, listing.seller_id);
    if !listing.category.is_empty() {
        println!("   Category: {}", listing.category);
    }
    println!("   Quantity: {}", extract_quantity(&listing.title));
    println!("   Status: {}", classify_status(&listing.title));
    println!("   Excluded: {}", is_excluded(&listing.title));
    println!("   URL: {}", listing.url);
    Ok(())
}
