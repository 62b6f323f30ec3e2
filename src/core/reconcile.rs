//! Aligns two price series on a shared date window

use chrono::NaiveDate;
use tracing::debug;

use super::error::CompareError;
use super::series::{DateWindow, PriceSeries};

/// Two series restricted to the same window. Both are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub window: DateWindow,
    pub first: PriceSeries,
    pub second: PriceSeries,
}

/// Computes the window both series are compared over.
///
/// An explicit start wins. Without one, the window opens on the first date
/// for which both series have data. The end is only ever the requested one.
pub fn effective_window(
    first: &PriceSeries,
    second: &PriceSeries,
    requested_start: Option<NaiveDate>,
    requested_end: Option<NaiveDate>,
) -> DateWindow {
    let start = requested_start.or_else(|| match (first.first_date(), second.first_date()) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    });
    DateWindow::new(start, requested_end)
}

pub fn reconcile(
    first: &PriceSeries,
    second: &PriceSeries,
    requested_start: Option<NaiveDate>,
    requested_end: Option<NaiveDate>,
) -> Result<ComparisonResult, CompareError> {
    let window = effective_window(first, second, requested_start, requested_end);
    let first = first.restrict(&window);
    let second = second.restrict(&window);

    debug!(
        %window,
        first = first.symbol(),
        first_points = first.len(),
        second = second.symbol(),
        second_points = second.len(),
        "Reconciled series"
    );

    if first.is_empty() || second.is_empty() {
        return Err(CompareError::EmptyResult);
    }

    Ok(ComparisonResult {
        window,
        first,
        second,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::PricePoint;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn series(symbol: &str, points: &[(&str, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            points.iter().map(|(date, close)| PricePoint::new(d(date), *close)),
        )
    }

    fn aapl() -> PriceSeries {
        series(
            "AAPL",
            &[
                ("2022-12-28", 126.04),
                ("2022-12-29", 129.61),
                ("2022-12-30", 129.93),
                ("2023-01-03", 125.07),
                ("2023-01-31", 144.29),
                ("2023-02-01", 145.43),
            ],
        )
    }

    fn amzn() -> PriceSeries {
        series(
            "AMZN",
            &[
                ("2022-12-30", 84.00),
                ("2023-01-03", 85.82),
                ("2023-01-31", 103.13),
            ],
        )
    }

    #[test]
    fn test_start_defaults_to_later_first_date() {
        let window = effective_window(&aapl(), &amzn(), None, None);
        assert_eq!(window.start, Some(d("2022-12-30")));
        assert_eq!(window.end, None);

        // Symmetric in argument order
        let window = effective_window(&amzn(), &aapl(), None, None);
        assert_eq!(window.start, Some(d("2022-12-30")));
    }

    #[test]
    fn test_reconcile_without_bounds_uses_intersection_start() {
        let result = reconcile(&aapl(), &amzn(), None, None).unwrap();

        assert_eq!(result.first.first_date(), Some(d("2022-12-30")));
        assert_eq!(result.first.len(), 4);
        assert_eq!(result.second.len(), 3);
        // No upper bound beyond each series' own extent
        assert_eq!(result.first.last_date(), Some(d("2023-02-01")));
        assert_eq!(result.second.last_date(), Some(d("2023-01-31")));
    }

    #[test]
    fn test_reconcile_with_explicit_window() {
        let result = reconcile(
            &aapl(),
            &amzn(),
            Some(d("2023-01-01")),
            Some(d("2023-01-31")),
        )
        .unwrap();

        assert_eq!(
            result.window,
            DateWindow::new(Some(d("2023-01-01")), Some(d("2023-01-31")))
        );
        for s in [&result.first, &result.second] {
            assert_eq!(s.len(), 2);
            assert_eq!(s.first_date(), Some(d("2023-01-03")));
            assert_eq!(s.last_date(), Some(d("2023-01-31")));
        }
    }

    #[test]
    fn test_explicit_start_overrides_intersection() {
        let result = reconcile(&aapl(), &amzn(), Some(d("2022-01-01")), None).unwrap();
        assert_eq!(result.first.len(), 6);
        assert_eq!(result.second.len(), 3);
    }

    #[test]
    fn test_end_before_both_histories_is_empty_result() {
        let result = reconcile(&aapl(), &amzn(), None, Some(d("2022-01-01")));
        assert_eq!(result.unwrap_err(), CompareError::EmptyResult);

        let result = reconcile(&aapl(), &amzn(), Some(d("2021-01-01")), Some(d("2022-01-01")));
        assert_eq!(result.unwrap_err(), CompareError::EmptyResult);
    }

    #[test]
    fn test_empty_side_is_empty_result() {
        let fake = PriceSeries::empty("FAKE");
        assert_eq!(effective_window(&fake, &aapl(), None, None).start, None);
        assert_eq!(
            reconcile(&fake, &aapl(), None, None).unwrap_err(),
            CompareError::EmptyResult
        );
    }

    #[test]
    fn test_inverted_window_is_empty_result() {
        let result = reconcile(&aapl(), &amzn(), Some(d("2023-02-01")), Some(d("2023-01-01")));
        assert_eq!(result.unwrap_err(), CompareError::EmptyResult);
    }
}
