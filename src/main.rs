use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tunefeed::{FeedConfig, FileConfig, HomeFeedAggregator, JsonFeedSource};

/// Builds a home feed from a directory of JSON fixtures and prints it.
/// Useful for reproducing feed-assembly behavior from captured payloads.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory of JSON fixture files (played.json, signals.json, ...).
    pub fixtures_dir: PathBuf,

    /// Optional TOML file overriding feed tuning defaults.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Session seed for the quick picks shuffle. Same seed, same feed.
    #[clap(long, default_value_t = 0)]
    pub seed: u64,

    /// Pretty-print the resulting feed JSON.
    #[clap(long)]
    pub pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args.config.map(|path| FileConfig::load(&path)).transpose()?;
    let config = FeedConfig::resolve(file_config);

    info!(dir = ?cli_args.fixtures_dir, "loading fixtures");
    let source = Arc::new(JsonFeedSource::load(&cli_args.fixtures_dir)?);

    let aggregator = HomeFeedAggregator::new(source, config);
    let feed = aggregator
        .build_home_feed(cli_args.seed)
        .await
        .context("building home feed")?;

    let rendered = if cli_args.pretty {
        serde_json::to_string_pretty(&feed)?
    } else {
        serde_json::to_string(&feed)?
    };
    println!("{}", rendered);

    Ok(())
}
