mod cli;

use channelscout::observability;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config = observability::with_bootstrap_tracing(|| cli::load_config(&cli))?;

    observability::init_tracing(&config.telemetry.log_filter);

    match cli.command {
        Commands::Config => cli::print_config(&config)?,
        Commands::Search(args) => {
            if !cli::run_search(&config, args).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
