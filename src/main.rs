//! # pathscout CLI
//!
//! Command-line front end for path discovery, standing in for the
//! surrounding screenshot tool: it assembles a `SpiderConfig` from
//! flags, runs `determine_paths`, and leaves the JSON cache artifact
//! behind for downstream consumption.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - `discover`: run path discovery and write the cache artifact
//! - `show`: print a previously written cache artifact

mod telemetry;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use pathscout::config::{SpiderConfig, StorageMode};
use pathscout::discover::determine_paths;
use pathscout::paths::PathStore;

#[derive(Parser)]
#[command(author, version, about = "Discovers the URL paths of a site for visual-regression screenshot tooling", long_about = None)]
struct Cli {
    /// Also append debug logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover the site's paths and write the cache artifact
    Discover(DiscoverArgs),

    /// Print a previously written cache artifact
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct DiscoverArgs {
    /// Root URL of the target site
    #[arg(required = true)]
    base_url: String,

    /// Sitemap location (URL or local file); parsed instead of crawling
    #[arg(short, long)]
    sitemap: Option<String>,

    /// Skip pattern (regular expression), repeatable
    #[arg(short = 'k', long = "skip")]
    skip_patterns: Vec<String>,

    /// Domain alias stripped from sitemap entries, repeatable
    #[arg(short, long = "alias")]
    aliases: Vec<String>,

    /// Where the discovered path set is written
    #[arg(short, long, default_value = "spider_paths.json")]
    cache_file: PathBuf,

    /// Cache age in days beyond which paths are re-discovered
    #[arg(short, long, default_value = "7")]
    max_age_days: u64,

    /// Crawl state storage (memory|persistent)
    #[arg(long, default_value = "memory", value_parser = ["memory", "persistent"])]
    storage: String,

    /// Persistent crawl-state database path
    #[arg(short, long, default_value = "spider_state.db")]
    database: PathBuf,

    /// Maximum number of in-flight page fetches
    #[arg(long, default_value = "8")]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "30")]
    timeout: u64,

    /// Discard cached and recorded state and discover from scratch
    #[arg(short, long)]
    refresh: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Cache artifact to print
    #[arg(short, long, default_value = "spider_paths.json")]
    cache_file: PathBuf,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = telemetry::init_tracing_subscriber(cli.log_file.as_deref());

    match cli.command {
        Some(Commands::Discover(args)) => {
            discover_command(args).await?;
        }
        Some(Commands::Show(args)) => {
            show_command(args).await?;
        }
        None => {
            let _ = Cli::parse_from(["pathscout", "--help"]);
        }
    }

    Ok(())
}

async fn discover_command(args: DiscoverArgs) -> anyhow::Result<()> {
    let storage_mode = match args.storage.as_str() {
        "persistent" => StorageMode::Persistent,
        _ => StorageMode::Memory,
    };

    let mut builder = SpiderConfig::builder()
        .base_url(&args.base_url)
        .skip_patterns(args.skip_patterns)
        .domain_aliases(args.aliases)
        .cache_file(&args.cache_file)
        .max_age_days(args.max_age_days)
        .storage_mode(storage_mode)
        .database_path(args.database)
        .concurrency(args.concurrency)
        .request_timeout_secs(args.timeout)
        .refresh(args.refresh);
    if let Some(sitemap) = args.sitemap {
        builder = builder.sitemap(sitemap);
    }
    let config = builder.build();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Discovering paths on {}...", args.base_url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = determine_paths(&config).await;
    spinner.finish_and_clear();

    match result? {
        Some(store) => {
            println!(
                "Discovered {} paths, written to {}",
                store.len(),
                args.cache_file.display()
            );
        }
        None => {
            println!("Paths already defined in config, nothing to discover");
        }
    }

    Ok(())
}

async fn show_command(args: ShowArgs) -> anyhow::Result<()> {
    let store = PathStore::load(&args.cache_file).await?;

    if args.format == "json" {
        // the artifact is already the JSON representation; loading
        // above validated its shape
        let raw = tokio::fs::read_to_string(&args.cache_file).await?;
        println!("{}", raw.trim_end());
    } else {
        for (key, path) in store.iter() {
            println!("{key} -> {path}");
        }
        println!("{} paths in {}", store.len(), args.cache_file.display());
    }

    Ok(())
}
