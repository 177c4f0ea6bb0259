//! Currency rate conversion seam for the application.

use crate::error::RateError;
use async_trait::async_trait;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Fetch the multiplier that converts one unit of `from` into `to`.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError>;
}
