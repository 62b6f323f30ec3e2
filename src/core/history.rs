use async_trait::async_trait;

use super::error::FetchError;
use super::series::PriceSeries;

/// A source of end-of-day closing prices.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Returns the full daily history for `symbol`, newest first.
    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, FetchError>;
}
