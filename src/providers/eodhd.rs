use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::{FetchError, HistoryProvider, PricePoint, PriceSeries};

/// End-of-day prices from EOD Historical Data.
pub struct EodhdProvider {
    base_url: Url,
    exchange: String,
    api_token: SecretString,
    client: reqwest::Client,
}

impl EodhdProvider {
    pub fn new(
        base_url: &str,
        exchange: &str,
        api_token: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid provider URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("Provider URL cannot be used as a base: {base_url}");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("stockcmp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(EodhdProvider {
            base_url,
            exchange: exchange.to_string(),
            api_token,
            client,
        })
    }

    /// `{base}/api/eod/{symbol}.{exchange}?api_token=..&order=d&fmt=json`
    fn endpoint(&self, symbol: &str) -> Url {
        let ticker = format!("{symbol}.{}", self.exchange);
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "eod", ticker.as_str()]);
        }
        url.query_pairs_mut()
            .append_pair("api_token", self.api_token.expose_secret())
            .append_pair("order", "d")
            .append_pair("fmt", "json");
        url
    }
}

#[derive(Debug, Deserialize)]
struct EodRecord {
    date: String,
    close: Option<f64>,
}

impl EodRecord {
    fn into_point(self) -> Option<PricePoint> {
        let date = match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                debug!("Skipping record with unparsable date '{}': {}", self.date, e);
                return None;
            }
        };
        self.close.map(|close| PricePoint::new(date, close))
    }
}

#[async_trait]
impl HistoryProvider for EodhdProvider {
    #[instrument(
        name = "EodhdHistoryFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, FetchError> {
        debug!("Requesting end-of-day history");

        // Transport errors carry the request URL, which includes the token
        let request_error = |source: reqwest::Error| FetchError::Request {
            symbol: symbol.to_string(),
            source: source.without_url(),
        };

        let response = self
            .client
            .get(self.endpoint(symbol))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        debug!(%status, "Received provider response");
        if !status.is_success() {
            return Err(FetchError::ProviderUnavailable {
                symbol: symbol.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(request_error)?;
        if body.trim().is_empty() {
            return Err(FetchError::NoData(symbol.to_string()));
        }

        let records: Vec<EodRecord> =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                symbol: symbol.to_string(),
                source,
            })?;
        let received = records.len();

        let points: Vec<PricePoint> = records
            .into_iter()
            .filter_map(EodRecord::into_point)
            .collect();
        if points.is_empty() {
            return Err(FetchError::NoData(symbol.to_string()));
        }

        debug!(received, usable = points.len(), "Parsed end-of-day records");
        Ok(PriceSeries::new(symbol, points))
    }
}
