//! upsearch main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use upsearch_api::start_server;
use upsearch_config::Config;
use upsearch_core::{AccountDirectory, QueryService};
use upsearch_upstream::UpBankClient;

#[derive(Parser, Debug)]
#[command(name = "upsearch")]
#[command(version = "0.1.0")]
#[command(about = "Transaction search service backed by the Up Bank API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!(
        "Config loaded: {} account(s), upstream {}",
        config.accounts.len(),
        config.upstream.base_url
    );
    if config.upstream.bearer_token().is_empty() {
        log::warn!(
            "No API token configured; set upstream.token or the UP_API_TOKEN environment variable"
        );
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let source = Arc::new(UpBankClient::from_config(&config.upstream));
        let directory = AccountDirectory::new(&config.accounts);
        let service = Arc::new(QueryService::new(directory, source));

        start_server(config, service).await
    })?;

    Ok(())
}
