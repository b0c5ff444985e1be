// Report builder - lays the report inputs out as a node tree
use crate::domain::chart::{
    ChartSeries, Fill, GridCell, GridFigure, PieChart, PieFigure, SeriesMode,
};
use crate::domain::error::ReportError;
use crate::domain::input::{PieInput, ReportInput};
use crate::domain::metric::{MetricGroup, MetricNote};
use crate::domain::report::{Node, Report};

const PIE_HOLE: f64 = 0.3;
const SCATTER_MARKER_SIZE: f64 = 10.0;

/// Running sums of `values`, in order.
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the whole report. Any mismatched chart input fails the build.
    pub fn build(&self, input: &ReportInput) -> Result<Report, ReportError> {
        let pies = self.pie_figure(input)?;
        let grid = self.grid_figure(input)?;

        let mut nodes = vec![
            Node::Title(input.title.clone()),
            Node::Text(input.intro.clone()),
            Node::Divider,
            Node::Header("Company Achievements Summary".to_string()),
            Node::Text(input.achievements_intro.clone()),
            Node::Columns(vec![
                metric_column(&input.contract_details),
                metric_column(&input.payment_highlights),
            ]),
            Node::Divider,
            Node::Header("Financial Performance".to_string()),
            Node::Columns(vec![
                metric_column(&input.quantity_and_value),
                metric_column(&input.financial_efficiency),
            ]),
            Node::Divider,
            Node::Subheader("Dispatch Efficiency".to_string()),
            Node::Text(
                MetricNote::new("Load Dispatched Dates", input.dispatch_dates.join(", "))
                    .to_markdown(),
            ),
            Node::Subheader("Margin Analysis".to_string()),
        ];
        nodes.extend(input.margin_analysis.iter().cloned().map(Node::Metric));
        nodes.extend([
            Node::Divider,
            Node::Header("Summary of Achievements".to_string()),
            Node::Expander {
                label: "Click to expand".to_string(),
                body: vec![Node::Text(
                    input
                        .achievements
                        .iter()
                        .map(|item| format!("- {}", item))
                        .collect::<Vec<_>>()
                        .join("\n"),
                )],
            },
            Node::Divider,
            Node::Subheader("Sales Data".to_string()),
            Node::Table(input.records.clone()),
            Node::Divider,
            Node::Header("Sales Performance Dashboard".to_string()),
            Node::Pies(pies),
            Node::Grid(grid),
        ]);

        tracing::debug!("Built report with {} top-level sections", nodes.len());
        Ok(Report::new(input.page_title.clone(), nodes))
    }

    fn pie_figure(&self, input: &ReportInput) -> Result<PieFigure, ReportError> {
        Ok(PieFigure {
            title: "Sales and Payment Distribution Analysis".to_string(),
            height: 500,
            width: 1000,
            charts: vec![
                pie("Sales Distribution by Buyer", &input.buyer_sales)?,
                pie("Payment Distribution", &input.payment_distribution)?,
            ],
        })
    }

    fn grid_figure(&self, input: &ReportInput) -> Result<GridFigure, ReportError> {
        let margin = &input.cumulative_margin;
        let cumulative_margin = ChartSeries::from_parallel(
            "Cumulative Margin",
            &margin.dates,
            &cumulative(&margin.margins),
        )?
        .fill(Fill::ToZeroY)
        .color("#5A9BD5");

        let progression = &input.progression;
        let cumulative_sales = ChartSeries::from_parallel(
            "Cumulative Sales",
            &progression.dates,
            &cumulative(&progression.sales_values),
        )?
        .fill(Fill::ToZeroY)
        .color("#70AD47");
        let cumulative_payments = ChartSeries::from_parallel(
            "Cumulative Payments",
            &progression.dates,
            &cumulative(&progression.payments_received),
        )?
        .fill(Fill::ToZeroY)
        .color("#2F5597");

        let price_quantity = ChartSeries::from_parallel(
            "Price vs. Quantity",
            &input.price_quantity.prices_per_kg,
            &input.price_quantity.quantities_lifted,
        )?
        .mode(SeriesMode::Markers)
        .marker_size(SCATTER_MARKER_SIZE)
        .color("#A3C1DA");

        let buyer_margin = ChartSeries::from_parallel(
            "Margin % vs. Buyer",
            &input.buyer_margin.buyers,
            &input.buyer_margin.margin_percentages,
        )?
        .mode(SeriesMode::Markers)
        .marker_size(SCATTER_MARKER_SIZE)
        .color("#5A9BD5");

        Ok(GridFigure {
            title: "Comprehensive Financial and Sales Analysis".to_string(),
            height: 700,
            width: 1000,
            cells: [
                [
                    GridCell::new(
                        "Cumulative Margin Over Time",
                        "Dates",
                        "Cumulative Margin (₹)",
                        vec![cumulative_margin],
                    ),
                    GridCell::new(
                        "Total Sales and Payment Progression",
                        "Dates",
                        "Amount (₹)",
                        vec![cumulative_sales, cumulative_payments],
                    ),
                ],
                [
                    GridCell::new(
                        "Price vs. Quantity Lifted",
                        "Price per Kg",
                        "Quantity Lifted (MT)",
                        vec![price_quantity],
                    ),
                    GridCell::new(
                        "Margin Percentage vs. Buyer",
                        "Buyers",
                        "Margin Percentage (%)",
                        vec![buyer_margin],
                    ),
                ],
            ],
        })
    }
}

fn pie(title: &str, input: &PieInput) -> Result<PieChart, ReportError> {
    let chart =
        PieChart::from_parallel(title, &input.labels, &input.values, &input.colors)?.hole(PIE_HOLE);
    tracing::debug!("Pie '{}' has {} slices totalling {}", title, chart.slices.len(), chart.total());
    Ok(chart)
}

fn metric_column(group: &MetricGroup) -> Vec<Node> {
    let mut column = vec![Node::Subheader(group.title.clone())];
    let (before, after) = group
        .cards
        .split_at(group.notes_after.min(group.cards.len()));
    column.extend(before.iter().cloned().map(Node::Metric));
    column.extend(group.notes.iter().map(|note| Node::Text(note.to_markdown())));
    column.extend(after.iter().cloned().map(Node::Metric));
    column
}
