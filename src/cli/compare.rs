use super::ui;
use crate::core::{ComparisonResult, PriceSeries};
use crate::service::{CompareRequest, ComparisonService};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(service: &ComparisonService, request: &CompareRequest, json: bool) -> Result<()> {
    let pb = ui::new_spinner(&format!(
        "Fetching {} and {}...",
        request.first, request.second
    ));
    let outcome = service.compare(request).await;
    pb.finish_and_clear();

    let comparison = outcome?;
    if json {
        println!("{}", serde_json::to_string_pretty(&comparison.chart)?);
    } else {
        println!("{}", display_as_table(&comparison.result));
    }
    Ok(())
}

fn series_row(series: &PriceSeries) -> Vec<Cell> {
    let earliest = series.points().last();
    let latest = series.points().first();

    vec![
        Cell::new(series.symbol()),
        ui::format_optional_cell(series.first_date(), |d| d.to_string()),
        ui::format_optional_cell(series.last_date(), |d| d.to_string()),
        ui::format_optional_cell(Some(series.len()), |n| n.to_string()),
        ui::format_optional_cell(earliest, |p| format!("{:.2}", p.close)),
        ui::format_optional_cell(latest, |p| format!("{:.2}", p.close)),
        ui::change_cell(series.change_pct()),
    ]
}

pub fn display_as_table(result: &ComparisonResult) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Days"),
        ui::header_cell("First Close"),
        ui::header_cell("Last Close"),
        ui::header_cell("Change"),
    ]);
    table.add_row(series_row(&result.first));
    table.add_row(series_row(&result.second));

    let title = format!("{} vs {}", result.first.symbol(), result.second.symbol());
    format!(
        "{}\n{}\n\n{table}",
        ui::style_text(&title, ui::StyleType::Title),
        ui::style_text(&format!("Window {}", result.window), ui::StyleType::Subtle),
    )
}
