//! Shop-Crawler main entry point
//!
//! This is the command-line interface for the Shop-Crawler product scraper.

use clap::Parser;
use shop_crawler::config::{load_config_with_hash, validate, Config};
use shop_crawler::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shop-Crawler: a product catalogue scraper
///
/// Shop-Crawler walks a shop's category menu and every subcategory listing,
/// saves one `info.json` per product in a category/subcategory/name tree and
/// downloads the product images next to it.
#[derive(Parser, Debug)]
#[command(name = "shop-crawler")]
#[command(version)]
#[command(about = "A product catalogue scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root directory of the dump tree
    #[arg(long, value_name = "DIR")]
    dump_path: Option<String>,

    /// Store records as <dump>/<name>/ instead of <dump>/<category>/<subcategory>/<name>/
    #[arg(long)]
    flatten: bool,

    /// Save records without downloading their images
    #[arg(long)]
    no_images: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(dump_path) = &self.dump_path {
            config.output.dump_path = dump_path.clone();
        }
        if self.flatten {
            config.output.flatten = true;
        }
        if self.no_images {
            config.output.download_images = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    cli.apply_overrides(&mut config);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shop_crawler=info,warn"),
            1 => EnvFilter::new("shop_crawler=debug,info"),
            2 => EnvFilter::new("shop_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Shop-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!(
        "  Products per listing page: {}",
        config.crawler.max_products_per_page
    );
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!(
        "  Retries: {} ({}ms apart)",
        config.crawler.max_retries, config.crawler.retry_delay_ms
    );
    println!("  Obey robots.txt: {}", config.crawler.obey_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent_string());

    println!("\nOutput:");
    println!("  Dump path: {}", config.output.dump_path);
    println!("  Flatten: {}", config.output.flatten);
    println!("  Download images: {}", config.output.download_images);

    println!("\nSelectors:");
    println!("  Category menu: '{}'", config.selectors.menu_label);
    println!("  Product links: {}", config.selectors.product_link);
    println!("  Next page: {}", config.selectors.next_page);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Dumping into {} ({} layout, images {})",
        config.output.dump_path,
        if config.output.flatten { "flat" } else { "nested" },
        if config.output.download_images { "on" } else { "off" }
    );

    // Run the crawler
    match run_crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
