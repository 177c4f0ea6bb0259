use anyhow::Result;
use clap::Parser;
use fxrate::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // A local .env must be loaded before the config reads the environment.
    dotenvy::dotenv().ok();

    let result = fxrate::run().await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Rate fetch failed");
    }
    result
}
