//! The comparison pipeline: validate, fetch both symbols, align, chart

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::{
    ChartDescription, CompareError, ComparisonResult, DateWindow, FetchError, HistoryProvider,
    PriceSeries, build_chart, reconcile,
};

/// A validated comparison request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    pub first: String,
    pub second: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl CompareRequest {
    /// Builds a request from raw user input. Symbols are trimmed and
    /// uppercased; blank dates count as absent.
    pub fn parse(
        first: &str,
        second: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, CompareError> {
        Ok(CompareRequest {
            first: normalize_symbol("symbol1", first)?,
            second: normalize_symbol("symbol2", second)?,
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

fn normalize_symbol(field: &'static str, raw: &str) -> Result<String, CompareError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(CompareError::MissingSymbol(field));
    }
    Ok(symbol)
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, CompareError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| CompareError::InvalidDate(s.to_string())),
    }
}

/// A finished comparison: the aligned series and the chart drawn from them.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub result: ComparisonResult,
    pub chart: ChartDescription,
}

pub struct ComparisonService {
    provider: Arc<dyn HistoryProvider>,
}

impl ComparisonService {
    pub fn new(provider: Arc<dyn HistoryProvider>) -> Self {
        ComparisonService { provider }
    }

    /// Fetches one symbol's history, restricted to `[from, to]`.
    ///
    /// Provider failures are logged and yield an empty series; the caller
    /// decides whether an empty series is fatal.
    pub async fn fetch_series(
        &self,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> PriceSeries {
        info!("Fetching data for {symbol}");
        match self.provider.fetch_history(symbol).await {
            Ok(series) => series.restrict(&DateWindow::new(from, to)),
            Err(e @ FetchError::NoData(_)) => {
                warn!(error = %e, "No data returned for {symbol}");
                PriceSeries::empty(symbol)
            }
            Err(e) => {
                error!(error = %e, "Error fetching data for {symbol}");
                PriceSeries::empty(symbol)
            }
        }
    }

    pub async fn compare(&self, request: &CompareRequest) -> Result<Comparison, CompareError> {
        let (first, second) = futures::join!(
            self.fetch_series(&request.first, None, None),
            self.fetch_series(&request.second, None, None),
        );

        let result = reconcile(&first, &second, request.start, request.end).inspect_err(|e| {
            warn!(
                first = %request.first,
                second = %request.second,
                "Comparison failed: {e}"
            );
        })?;
        let chart = build_chart(
            &result.first,
            &result.second,
            &request.first,
            &request.second,
        );

        info!(
            window = %result.window,
            first_points = result.first.len(),
            second_points = result.second.len(),
            "Built comparison for {} and {}",
            request.first,
            request.second
        );
        Ok(Comparison { result, chart })
    }
}
