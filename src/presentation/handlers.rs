// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, json_response, text_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

fn failure(what: &str, e: anyhow::Error) -> Response {
    tracing::error!("Error {}: {:#}", what, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error {}: {}", what, e),
    )
        .into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the full report page; every request runs a fresh build and render pass
pub async fn report_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = state.compress && accepts_brotli(&headers);

    match state.report_service.render_page().await {
        Ok(page) => match text_response(page.body, page.content_type, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => failure("rendering report", e),
    }
}

/// The report node tree as JSON
pub async fn report_json(State(state): State<Arc<AppState>>) -> Response {
    match state.report_service.build_report().await {
        Ok(report) => match json_response(&report) {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => failure("building report", e),
    }
}

/// Metric cards whose authored text disagrees with the ledger
pub async fn metric_audit(State(state): State<Arc<AppState>>) -> Response {
    match state.report_service.audit().await {
        Ok(discrepancies) => match json_response(&discrepancies) {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => failure("auditing metrics", e),
    }
}
