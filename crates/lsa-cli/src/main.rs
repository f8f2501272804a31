//! CLI entry point.

use clap::Parser;
use tracing::error;

use lsa_cli::{Cli, logging, run};

#[tokio::main]
async fn main() {
    // .env must be loaded before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_json);

    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}
