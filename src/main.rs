// Main entry point - Dependency injection, CLI and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::report_service::ReportService;
use crate::infrastructure::config::{load_config, AppConfig};
use crate::infrastructure::html::HtmlRenderer;
use crate::infrastructure::static_source::StaticReportSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, metric_audit, report_json, report_page};

#[derive(Parser)]
#[command(name = "sales-report")]
#[command(about = "Sales summary report dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard, rendering it afresh on each page load (default).
    Serve,
    /// Render the dashboard once to a self-contained HTML file.
    Render {
        #[arg(short = 'o', long)]
        out: PathBuf,
    },
}

fn build_service(config: &AppConfig) -> ReportService {
    ReportService::new(
        Arc::new(StaticReportSource::new()),
        Arc::new(HtmlRenderer::new()),
        config.report.metrics,
    )
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(report_page))
        .route("/report.json", get(report_json))
        .route("/report/audit", get(metric_audit))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;

    // Create application state
    let state = Arc::new(AppState {
        report_service: build_service(&config),
        compress: config.report.compress,
    });

    // Pages are compressed by the handler itself, so no CompressionLayer here
    let router = router(state);

    tracing::info!(
        "Starting sales-report service on {} ({:?} metrics)",
        addr,
        config.report.metrics
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn render(config: AppConfig, out: PathBuf) -> anyhow::Result<()> {
    let page = build_service(&config).render_page().await?;
    tokio::fs::write(&out, page.body)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Wrote {}", out.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = load_config()?;

    match cli.cmd.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Render { out } => render(config, out).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["sales-report"]).unwrap();
        assert!(cli.cmd.is_none());

        let cli = Cli::try_parse_from(["sales-report", "render", "-o", "report.html"]).unwrap();
        match cli.cmd {
            Some(Commands::Render { out }) => assert_eq!(out, PathBuf::from("report.html")),
            _ => panic!("expected render command"),
        }
    }

    #[tokio::test]
    async fn test_render_writes_file() {
        let out = std::env::temp_dir().join(format!("sales-report-{}.html", std::process::id()));
        let config = infrastructure::config::load_config_from("config/does-not-exist").unwrap();

        render(config, out.clone()).await.unwrap();
        let html = std::fs::read_to_string(&out).unwrap();
        std::fs::remove_file(&out).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Sales Distribution by Buyer"));
    }
}
