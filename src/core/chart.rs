//! Declarative line-chart description, rendered client side by Plotly.js

use chrono::NaiveDate;
use serde::Serialize;

use super::series::PriceSeries;

const PAPER_BACKGROUND: &str = "#111111";
const PLOT_BACKGROUND: &str = "#1e1e1e";
const TEXT_COLOR: &str = "#e0e0e0";
const AXIS_LINE_COLOR: &str = "#8a8a8a";
const GRID_COLOR: &str = "#333333";
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const TRACE_COLORS: [&str; 2] = ["#4fc3f7", "#ffb74d"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub showline: bool,
    pub linecolor: String,
    pub linewidth: u32,
    pub showgrid: bool,
    pub gridcolor: String,
    pub zeroline: bool,
    pub tickfont: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub bgcolor: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    pub legend: Legend,
    pub hovermode: String,
}

fn font(size: u32) -> Font {
    Font {
        family: FONT_FAMILY.to_string(),
        color: TEXT_COLOR.to_string(),
        size,
    }
}

fn axis(title: &str) -> Axis {
    Axis {
        title: Title {
            text: title.to_string(),
            font: font(16),
        },
        showline: true,
        linecolor: AXIS_LINE_COLOR.to_string(),
        linewidth: 2,
        showgrid: true,
        gridcolor: GRID_COLOR.to_string(),
        zeroline: false,
        tickfont: font(12),
    }
}

fn trace(series: &PriceSeries, label: &str, color: &str) -> Trace {
    // Series are stored newest first; plot them in calendar order
    let (x, y): (Vec<NaiveDate>, Vec<f64>) = series
        .points()
        .iter()
        .rev()
        .map(|p| (p.date, p.close))
        .unzip();

    Trace {
        kind: "scatter".to_string(),
        mode: "lines".to_string(),
        name: label.to_string(),
        x,
        y,
        line: Line {
            color: color.to_string(),
            width: 2.0,
        },
    }
}

/// Builds the comparison chart. Empty series get no trace.
pub fn build_chart(
    first: &PriceSeries,
    second: &PriceSeries,
    first_label: &str,
    second_label: &str,
) -> ChartDescription {
    let data = [(first, first_label), (second, second_label)]
        .into_iter()
        .zip(TRACE_COLORS)
        .filter(|((series, _), _)| !series.is_empty())
        .map(|((series, label), color)| trace(series, label, color))
        .collect();

    ChartDescription {
        data,
        layout: Layout {
            title: Title {
                text: format!("{first_label} vs {second_label} closing prices"),
                font: font(22),
            },
            xaxis: axis("Date"),
            yaxis: axis("Closing Price (USD)"),
            paper_bgcolor: PAPER_BACKGROUND.to_string(),
            plot_bgcolor: PLOT_BACKGROUND.to_string(),
            font: font(14),
            legend: Legend {
                bgcolor: PLOT_BACKGROUND.to_string(),
                font: font(13),
            },
            hovermode: "x unified".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::PricePoint;

    fn series(symbol: &str, points: &[(&str, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            points
                .iter()
                .map(|(date, close)| PricePoint::new(date.parse().unwrap(), *close)),
        )
    }

    #[test]
    fn test_two_series_make_two_traces() {
        let aapl = series(
            "AAPL",
            &[("2023-01-03", 125.07), ("2023-01-04", 126.36), ("2023-01-05", 125.02)],
        );
        let amzn = series("AMZN", &[("2023-01-03", 85.82), ("2023-01-04", 85.14)]);

        let chart = build_chart(&aapl, &amzn, "AAPL", "AMZN");

        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[0].name, "AAPL");
        assert_eq!(chart.data[0].x.len(), aapl.len());
        assert_eq!(chart.data[0].y.len(), aapl.len());
        assert_eq!(chart.data[1].name, "AMZN");
        assert_eq!(chart.data[1].x.len(), amzn.len());

        // Calendar order
        assert_eq!(chart.data[0].x[0].to_string(), "2023-01-03");
        assert_eq!(chart.data[0].y, vec![125.07, 126.36, 125.02]);
    }

    #[test]
    fn test_empty_series_get_no_trace() {
        let aapl = series("AAPL", &[("2023-01-03", 125.07)]);
        let fake = PriceSeries::empty("FAKE");

        let chart = build_chart(&fake, &aapl, "FAKE", "AAPL");
        assert_eq!(chart.data.len(), 1);
        assert_eq!(chart.data[0].name, "AAPL");

        let chart = build_chart(&fake, &fake, "FAKE", "FAKE");
        assert!(chart.data.is_empty());
    }

    #[test]
    fn test_layout_titles_and_theme() {
        let chart = build_chart(
            &PriceSeries::empty("AAPL"),
            &PriceSeries::empty("AMZN"),
            "AAPL",
            "AMZN",
        );

        assert!(chart.layout.title.text.contains("AAPL"));
        assert!(chart.layout.title.text.contains("AMZN"));
        assert_eq!(chart.layout.xaxis.title.text, "Date");
        assert_eq!(chart.layout.yaxis.title.text, "Closing Price (USD)");
        assert_eq!(chart.layout.paper_bgcolor, PAPER_BACKGROUND);
    }

    #[test]
    fn test_serializes_as_plotly_figure() {
        let aapl = series("AAPL", &[("2023-01-03", 125.07)]);
        let chart = build_chart(&aapl, &PriceSeries::empty("AMZN"), "AAPL", "AMZN");

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["mode"], "lines");
        assert_eq!(json["data"][0]["x"][0], "2023-01-03");
        assert_eq!(json["data"][0]["y"][0], 125.07);
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "Closing Price (USD)");
    }
}
