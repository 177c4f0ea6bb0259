pub mod config;
pub mod currency_provider;
pub mod error;
pub mod log;
pub mod providers;

use crate::currency_provider::CurrencyRateProvider;
use anyhow::Result;
use tracing::{debug, info};

pub async fn run() -> Result<()> {
    info!("Rate fetch starting...");

    let config = config::AppConfig::from_env();
    debug!("Loaded config: {config:#?}");

    let provider = providers::exchange_rate_api::ExchangeRateApiProvider::from_config(&config);
    let rate = provider.get_rate(&config.source, &config.dest).await?;

    println!("Rate: {rate}");
    Ok(())
}
