//! Daily closing-price series and the date windows used to align them

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }
}

/// Closing prices for one symbol, newest first, at most one point per date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: &str, points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points.into_iter().collect();

        // Stable sort, so the first record seen for a date survives the dedup
        points.sort_by(|a, b| b.date.cmp(&a.date));
        points.dedup_by_key(|p| p.date);

        PriceSeries {
            symbol: symbol.to_string(),
            points,
        }
    }

    pub fn empty(symbol: &str) -> Self {
        PriceSeries {
            symbol: symbol.to_string(),
            points: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest date with a closing price.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Latest date with a closing price.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by(|p| date.cmp(&p.date))
            .ok()
            .map(|index| self.points[index].close)
    }

    /// Returns a copy holding only the points inside `window`.
    pub fn restrict(&self, window: &DateWindow) -> PriceSeries {
        PriceSeries {
            symbol: self.symbol.clone(),
            points: self
                .points
                .iter()
                .filter(|p| window.contains(p.date))
                .copied()
                .collect(),
        }
    }

    /// Percentage change from the earliest to the latest close.
    pub fn change_pct(&self) -> Option<f64> {
        let earliest = self.points.last()?.close;
        let latest = self.points.first()?.close;
        if earliest <= 0.0 {
            return None;
        }
        Some(((latest - earliest) / earliest) * 100.0)
    }
}

/// Inclusive date range; a missing bound is open-ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateWindow { start, end }
    }

    pub fn unbounded() -> Self {
        DateWindow::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = |d: Option<NaiveDate>| d.map_or("..".to_string(), |d| d.to_string());
        write!(f, "[{}, {}]", bound(self.start), bound(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn series(symbol: &str, points: &[(&str, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            points.iter().map(|(date, close)| PricePoint::new(d(date), *close)),
        )
    }

    #[test]
    fn test_new_sorts_descending_and_keeps_first_duplicate() {
        let s = series(
            "AAPL",
            &[
                ("2023-01-03", 125.07),
                ("2023-01-05", 126.36),
                ("2023-01-04", 126.36),
                ("2023-01-03", 999.0),
            ],
        );

        let dates: Vec<_> = s.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d("2023-01-05"), d("2023-01-04"), d("2023-01-03")]);
        assert_eq!(s.close_on(d("2023-01-03")), Some(125.07));
        assert_eq!(s.first_date(), Some(d("2023-01-03")));
        assert_eq!(s.last_date(), Some(d("2023-01-05")));
    }

    #[test]
    fn test_close_on_missing_date() {
        let s = series("AAPL", &[("2023-01-03", 125.07), ("2023-01-05", 126.36)]);
        assert_eq!(s.close_on(d("2023-01-04")), None);
        assert_eq!(s.close_on(d("2023-01-05")), Some(126.36));
    }

    #[test]
    fn test_restrict_is_inclusive() {
        let s = series(
            "MSFT",
            &[
                ("2022-12-30", 239.82),
                ("2023-01-03", 239.58),
                ("2023-01-31", 247.81),
                ("2023-02-01", 252.75),
            ],
        );
        let window = DateWindow::new(Some(d("2023-01-03")), Some(d("2023-01-31")));

        let restricted = s.restrict(&window);
        assert_eq!(restricted.symbol(), "MSFT");
        assert_eq!(restricted.len(), 2);
        assert_eq!(restricted.first_date(), Some(d("2023-01-03")));
        assert_eq!(restricted.last_date(), Some(d("2023-01-31")));
    }

    #[test]
    fn test_open_ended_windows() {
        let date = d("2023-06-15");
        assert!(DateWindow::unbounded().contains(date));
        assert!(DateWindow::new(Some(date), None).contains(date));
        assert!(!DateWindow::new(None, Some(d("2023-06-14"))).contains(date));
        assert_eq!(
            DateWindow::new(Some(date), None).to_string(),
            "[2023-06-15, ..]"
        );
    }

    #[test]
    fn test_change_pct() {
        let s = series("AMZN", &[("2023-01-03", 100.0), ("2023-01-31", 110.0)]);
        assert!((s.change_pct().unwrap() - 10.0).abs() < 1e-9);

        assert!(PriceSeries::empty("AMZN").change_pct().is_none());
        assert!(series("ZERO", &[("2023-01-03", 0.0)]).change_pct().is_none());
    }
}
