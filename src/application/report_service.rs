// Report service - Use case for building and rendering the sales report
use crate::application::metrics::{apply_metrics_mode, audit_metrics, MetricDiscrepancy};
use crate::application::report_builder::ReportBuilder;
use crate::application::report_renderer::ReportRenderer;
use crate::application::report_source::ReportSource;
use crate::domain::metric::MetricsMode;
use crate::domain::report::Report;
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;

/// A rendered page and the content type it should be served with.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub body: String,
    pub content_type: &'static str,
}

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn ReportSource>,
    renderer: Arc<dyn ReportRenderer>,
    builder: ReportBuilder,
    mode: MetricsMode,
}

impl ReportService {
    pub fn new(
        source: Arc<dyn ReportSource>,
        renderer: Arc<dyn ReportRenderer>,
        mode: MetricsMode,
    ) -> Self {
        Self {
            source,
            renderer,
            builder: ReportBuilder::new(),
            mode,
        }
    }

    pub async fn build_report(&self) -> anyhow::Result<Report> {
        let mut input = self.source.load().await.context("Failed to load report inputs")?;

        let discrepancies = audit_metrics(&input);
        for d in &discrepancies {
            tracing::warn!(
                "Metric '{}' shows {} but the ledger gives {}",
                d.label,
                d.displayed,
                d.derived
            );
        }

        apply_metrics_mode(&mut input, self.mode);
        let report = self
            .builder
            .build(&input)
            .context("Failed to build report")?;

        tracing::debug!(
            "Report built ({:?} metrics, {} cards, {} ledger rows)",
            self.mode,
            report.metric_cards().len(),
            input.records.len()
        );
        Ok(report)
    }

    /// One full pass: load, build and render.
    pub async fn render_page(&self) -> anyhow::Result<RenderedPage> {
        let start_time = Instant::now();
        let report = self.build_report().await?;
        let body = self
            .renderer
            .render(&report)
            .context("Failed to render report")?;

        tracing::info!(
            "Rendered '{}' ({} bytes) in {:?}",
            report.page_title,
            body.len(),
            start_time.elapsed()
        );
        Ok(RenderedPage {
            body,
            content_type: self.renderer.content_type(),
        })
    }

    pub async fn audit(&self) -> anyhow::Result<Vec<MetricDiscrepancy>> {
        let input = self.source.load().await.context("Failed to load report inputs")?;
        Ok(audit_metrics(&input))
    }
}
