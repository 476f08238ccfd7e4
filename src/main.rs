//! amz-color-counter - Tally Amazon product reviews per color variant

use amz_color_counter::commands::CountCommand;
use amz_color_counter::config::{parse_attribute, parse_page_limit, Config, OutputFormat, Pagination};
use amz_color_counter::error::CounterError;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-color-counter",
    version,
    about = "Count Amazon product reviews per color variant",
    long_about = "Fetches every reviews page of an Amazon product and tallies how many reviews were left for each color (or other variant attribute)."
)]
struct Cli {
    /// Product page URL
    url: Option<String>,

    /// Maximum number of reviews pages to visit
    #[arg(short, long, env = "AMZ_PAGE_LIMIT", value_parser = parse_page_limit)]
    page_limit: Option<u32>,

    /// Review attribute to tally (e.g. Color, Size, Style)
    #[arg(short, long, env = "AMZ_ATTRIBUTE", value_parser = parse_attribute)]
    attribute: Option<String>,

    /// How to walk the reviews pages (last-page, next-link)
    #[arg(long)]
    pagination: Option<Pagination>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Do not print per-page progress
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let Some(url) = cli.url else {
        return Err(CounterError::MissingUrl.into());
    };

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(limit) = cli.page_limit {
        config.page_limit = Some(limit);
    }
    if let Some(attribute) = cli.attribute {
        config.attribute = attribute;
    }
    if let Some(pagination) = cli.pagination {
        config.pagination = pagination;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    config.quiet |= cli.quiet;

    let cmd = CountCommand::new(config);
    let output = cmd.execute(&url).await?;
    println!("{}", output);

    Ok(())
}
