mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "csapi-cli")]
#[command(about = "Query the Superstore grocery API and print result envelopes as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List pickup locations for the configured banner
    Stores,
    /// Search a store's catalogue
    Search {
        /// Search term (e.g. "milk")
        term: String,
        /// Store to search in
        #[arg(long)]
        store: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Results per page
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    /// Show one product as sold at a store
    Detail {
        /// Product code (e.g. 21053436_EA)
        product_id: String,
        /// Store the price applies to
        #[arg(long)]
        store: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = csapi_core::load_client_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo = csapi_client::SuperstoreRepository::from_config(&config)?;
    tracing::debug!(?config, "client configured");

    let ok = commands::run(&repo, cli.command, &mut std::io::stdout().lock()).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
