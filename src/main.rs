// shopscrape: harvest a ShopMy collection page into a CSV file.
//
// Logs go to stderr; set RUST_LOG to change verbosity.

use anyhow::Result;
use clap::Parser;
use kodegen_tools_shopscrape::{ScrapeConfig, pipeline};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kodegen_tools_shopscrape::utils::{
    DEFAULT_COLLECTION_URL, DEFAULT_MAX_SCROLL_ROUNDS, DEFAULT_OUTPUT_FILE, ERROR_SCREENSHOT_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "shopscrape", version, about = "Scrape products from a ShopMy collection")]
struct Cli {
    /// Collection page to scrape
    #[arg(long, default_value = DEFAULT_COLLECTION_URL)]
    url: String,

    /// CSV output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Where to write a screenshot if scraping fails
    #[arg(long, default_value = ERROR_SCREENSHOT_FILE)]
    screenshot: PathBuf,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Stop scrolling after this many rounds even if the page keeps growing
    #[arg(long, default_value_t = DEFAULT_MAX_SCROLL_ROUNDS)]
    max_scroll_rounds: usize,

    /// HEAD-check every product link and log the unreachable ones
    #[arg(long)]
    verify_links: bool,

    /// Extract from a saved HTML file instead of launching a browser
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Chrome profile directory to use instead of a temporary one
    #[arg(long)]
    chrome_data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,chromiumoxide::handler=off,chromiumoxide::conn=off")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ScrapeConfig::builder()
        .target_url(cli.url)
        .output_path(cli.output)
        .screenshot_path(cli.screenshot)
        .headless(!cli.headed)
        .max_scroll_rounds(cli.max_scroll_rounds)
        .verify_links(cli.verify_links)
        .snapshot_path(cli.snapshot)
        .chrome_data_dir(cli.chrome_data_dir)
        .build()?;

    info!("Starting scrape of {}", config.target_url());

    let report = match pipeline::run(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("Scrape failed: {e:#}");
            return Err(e);
        }
    };

    if !report.unreachable_links.is_empty() {
        warn!(
            "{} product link(s) did not answer 200 OK; they were kept in the output",
            report.unreachable_links.len()
        );
    }

    match report.saved {
        Some(saved) => info!(
            "Done: {} products written to {} ({} duplicates removed)",
            saved.written,
            saved.path.display(),
            saved.duplicates_removed
        ),
        None => info!("Done: no products found"),
    }
    Ok(())
}
