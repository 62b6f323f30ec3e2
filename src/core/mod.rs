//! Core business logic abstractions

pub mod chart;
pub mod config;
pub mod error;
pub mod history;
pub mod log;
pub mod reconcile;
pub mod series;

// Re-export main types for cleaner imports
pub use chart::{ChartDescription, build_chart};
pub use error::{CompareError, FetchError};
pub use history::HistoryProvider;
pub use reconcile::{ComparisonResult, effective_window, reconcile};
pub use series::{DateWindow, PricePoint, PriceSeries};
