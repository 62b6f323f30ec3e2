use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while retrieving a symbol's history from a provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status} for {symbol}")]
    ProviderUnavailable { symbol: String, status: StatusCode },

    /// The provider answered, but without any usable records.
    #[error("no data returned for {0}")]
    NoData(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("request failed for {symbol}: {source}")]
    Request {
        symbol: String,
        source: reqwest::Error,
    },

    #[error("failed to parse provider response for {symbol}: {source}")]
    Decode {
        symbol: String,
        source: serde_json::Error,
    },
}

/// Errors that fail a comparison request. All of them are the caller's to fix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("{0} is required")]
    MissingSymbol(&'static str),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("one or both symbols returned no data")]
    EmptyResult,
}
