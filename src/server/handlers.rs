use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use axum::{Form, Json};
use serde::Deserialize;

use super::AppState;
use super::error::AppError;
use crate::core::ChartDescription;
use crate::service::CompareRequest;

const INDEX_HTML: &str = include_str!("index.html");

/// Fields posted by the comparison form. Missing fields are validated by
/// `CompareRequest::parse`; bodies the extractor cannot decode become a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompareForm {
    pub symbol1: String,
    pub symbol2: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn compare(
    State(state): State<AppState>,
    form: Result<Form<CompareForm>, FormRejection>,
) -> Result<Json<ChartDescription>, AppError> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = CompareRequest::parse(
        &form.symbol1,
        &form.symbol2,
        form.start_date.as_deref(),
        form.end_date.as_deref(),
    )?;

    let comparison = state.service.compare(&request).await?;
    Ok(Json(comparison.chart))
}
