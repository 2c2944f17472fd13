use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use channelscout::api::DownloadKind;
use channelscout::config::Config;
use channelscout::controller::{SearchController, SearchOutcome, SearchState};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Parser, Debug)]
#[command(name = "channelscout")]
#[command(about = "Run YouTube channel scraping jobs and collect the results", long_about = None)]
pub struct Cli {
    /// Configuration file (default: $CHANNELSCOUT_CONFIG or config/channelscout.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a search and wait for the scraped channels
    Search(SearchArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search query sent to the scraper
    pub query: String,

    /// Maximum number of channels to collect
    #[arg(long, short = 'n')]
    pub max_channels: String,

    /// Print the channels as JSON
    #[arg(long)]
    pub json: bool,

    /// Download the CSV export after a successful search (details or urls)
    #[arg(long)]
    pub download: Option<DownloadKind>,

    /// Where to write the downloaded CSV (default: suggested file name)
    #[arg(long, short = 'o', requires = "download")]
    pub output: Option<PathBuf>,
}

/// Load configuration, honouring an explicit `--config` path
pub fn load_config(cli: &Cli) -> Result<Config, AnyError> {
    let config = match &cli.config {
        Some(path) => Config::load_with_file(path.clone())?,
        None => Config::load()?,
    };
    Ok(config)
}

pub fn print_config(config: &Config) -> Result<(), AnyError> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Run one search; returns `false` when the search ended in failure
pub async fn run_search(config: &Config, args: SearchArgs) -> Result<bool, AnyError> {
    let controller = SearchController::from_config(config)?;
    info!(base_url = %config.api.base_url, "Using scraping API");

    let outcome = controller.start_search(&args.query, &args.max_channels).await;
    let state = controller.state().await;

    let succeeded = match &outcome {
        SearchOutcome::Failure(reason) => {
            eprintln!("Error: {}", reason);
            false
        }
        SearchOutcome::Success(_) if args.json => {
            println!("{}", serde_json::to_string_pretty(&state.results)?);
            true
        }
        SearchOutcome::Success(_) => {
            print_channels(&state);
            true
        }
    };

    if succeeded {
        if let Some(kind) = args.download {
            match controller.download(kind).await? {
                Some(file) => {
                    let path = args.output.unwrap_or_else(|| PathBuf::from(&file.file_name));
                    tokio::fs::write(&path, &file.bytes).await?;
                    eprintln!("Saved: {} ({} bytes)", path.display(), file.bytes.len());
                }
                None => eprintln!("No results to download"),
            }
        }
    }

    debug!(metrics = ?controller.metrics().snapshot(), "Search finished");
    Ok(succeeded)
}

fn print_channels(state: &SearchState) {
    if state.results.is_empty() {
        println!("No results found. Try searching for channels.");
        return;
    }

    println!("{} channels for \"{}\"", state.results.len(), state.query);
    for channel in &state.results {
        let marker = match &state.selected {
            Some(selected) if selected.id == channel.id => '*',
            _ => ' ',
        };
        println!(
            "{} {:<28} {:>12} subs {:>7} videos {:>16} views  {:<14} {:<22} {}",
            marker,
            channel.display_name,
            channel.subscriber_count_text,
            channel.video_count,
            channel.total_views_text,
            channel.nationality,
            channel.joined_on,
            channel.id
        );
    }
}
