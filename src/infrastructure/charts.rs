// Chart options for the pie rings and the 2x2 plot grid
//
// Each pie or grid cell becomes one ECharts `Chart`; the page serializes its
// options into the chart container and initializes them in the browser.
use super::format::trimmed;
use crate::domain::chart::{
    AxisValue, ChartSeries, Fill, GridCell, PieChart, PieSlice, Point, SeriesMode,
};
use crate::domain::error::ReportError;
use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AreaStyle, AxisType, Color, Tooltip, Trigger},
    series::{Line, Pie, Scatter},
};

/// Outer pie radius, as a percentage of the container.
const PIE_RADIUS: f64 = 70.0;

pub fn pie_chart(chart: &PieChart) -> Chart {
    // Non-positive values get no arc
    let slices: Vec<&PieSlice> = chart.slices.iter().filter(|s| s.value > 0.0).collect();
    let inner = format!("{}%", trimmed(chart.hole * PIE_RADIUS));
    let outer = format!("{}%", trimmed(PIE_RADIUS));

    Chart::new()
        .title(Title::new().text(chart.title.as_str()))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .color(slices.iter().map(|s| Color::from(s.color.as_str())).collect())
        .series(
            Pie::new()
                .name(chart.title.as_str())
                .radius(vec![inner.as_str(), outer.as_str()])
                .data(
                    slices
                        .iter()
                        .map(|s| (s.value, s.label.as_str()))
                        .collect(),
                ),
        )
}

fn x_label(x: &AxisValue) -> String {
    match x {
        AxisValue::Category(label) => label.clone(),
        AxisValue::Number(n) => trimmed(*n),
    }
}

/// Distinct x labels in first-seen order, or `None` when every x is numeric.
fn categories(cell: &GridCell) -> Option<Vec<String>> {
    let points: Vec<&Point> = cell.series.iter().flat_map(|s| &s.points).collect();
    if points.iter().all(|p| matches!(p.x, AxisValue::Number(_))) {
        return None;
    }

    let mut labels: Vec<String> = Vec::new();
    for p in points {
        let label = x_label(&p.x);
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    Some(labels)
}

/// `[x, y]` pairs; on a category axis x is the label's index, so repeated labels share a position.
fn series_data(series: &ChartSeries, categories: Option<&[String]>) -> Vec<Vec<f64>> {
    series
        .points
        .iter()
        .map(|p| {
            let x = match (categories, &p.x) {
                (Some(labels), x) => {
                    let label = x_label(x);
                    labels.iter().position(|l| *l == label).unwrap_or(0) as f64
                }
                (None, AxisValue::Number(n)) => *n,
                (None, AxisValue::Category(_)) => 0.0,
            };
            vec![x, p.y]
        })
        .collect()
}

/// One grid cell as a cartesian chart.
///
/// The y axis asks for 5 ticks. It is left unscaled, and so always spans 0, when any
/// series is filled to zero.
pub fn cell_chart(cell: &GridCell) -> Chart {
    let categories = categories(cell);
    let filled = cell.series.iter().any(|s| s.fill == Fill::ToZeroY);

    let x_axis = match &categories {
        Some(labels) => Axis::new().type_(AxisType::Category).data(labels.clone()),
        None => Axis::new().type_(AxisType::Value).scale(true),
    }
    .name(cell.x_axis_title.as_str());

    let mut y_axis = Axis::new()
        .type_(AxisType::Value)
        .name(cell.y_axis_title.as_str())
        .split_number(4);
    if !filled {
        y_axis = y_axis.scale(true);
    }

    let mut chart = Chart::new()
        .title(Title::new().text(cell.title.as_str()))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("8%")
                .bottom("12%")
                .contain_label(true),
        )
        .color(
            cell.series
                .iter()
                .map(|s| Color::from(s.color.as_str()))
                .collect(),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    for series in &cell.series {
        let data = series_data(series, categories.as_deref());
        chart = match series.mode {
            SeriesMode::Markers => chart.series(
                Scatter::new()
                    .name(series.name.as_str())
                    .symbol_size(series.marker_size)
                    .data(data),
            ),
            SeriesMode::LinesMarkers => {
                let mut line = Line::new().name(series.name.as_str()).data(data);
                if series.fill == Fill::ToZeroY {
                    line = line.area_style(AreaStyle::new());
                }
                chart.series(line)
            }
        };
    }
    chart
}

/// Serialized options for the browser.
pub fn chart_options(chart: &Chart) -> Result<String, ReportError> {
    serde_json::to_string(chart).map_err(|e| ReportError::Render(format!("chart options: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn options(chart: &Chart) -> Value {
        serde_json::from_str(&chart_options(chart).unwrap()).unwrap()
    }

    /// First entry of an option that may be a single object or a list.
    fn first(value: &Value) -> &Value {
        match value {
            Value::Array(items) => &items[0],
            other => other,
        }
    }

    fn pie(values: &[f64]) -> PieChart {
        let labels: Vec<String> = (0..values.len()).map(|i| format!("slice {}", i)).collect();
        let colors: Vec<String> = (0..values.len()).map(|i| format!("#00000{}", i)).collect();
        PieChart::from_parallel("Sales Distribution by Buyer", &labels, values, &colors)
            .unwrap()
            .hole(0.3)
    }

    fn area_cell(ys: &[f64]) -> GridCell {
        let dates: Vec<String> = (0..ys.len()).map(|i| format!("8/{}/2024", 12 + i)).collect();
        let series = ChartSeries::from_parallel("Cumulative Margin", &dates, ys)
            .unwrap()
            .fill(Fill::ToZeroY);
        GridCell::new("Cumulative Margin Over Time", "Dates", "Cumulative Margin (₹)", vec![series])
    }

    #[test]
    fn test_pie_ring_skips_non_positive_slices() {
        let value = options(&pie_chart(&pie(&[3_045_000.0, 8_670_000.0, 0.0, 2_900_000.0])));
        let series = first(&value["series"]);

        assert_eq!(series["type"], "pie");
        assert_eq!(series["radius"], serde_json::json!(["21%", "70%"]));
        let data = series["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[2]["name"], "slice 3");
        assert_eq!(value["color"], serde_json::json!(["#000000", "#000001", "#000003"]));
        assert_eq!(first(&value["title"])["text"], "Sales Distribution by Buyer");
    }

    #[test]
    fn test_pie_with_zero_total_has_no_slices() {
        let value = options(&pie_chart(&pie(&[0.0, 0.0])));
        let data = &first(&value["series"])["data"];
        assert!(data.is_null() || data.as_array().is_some_and(|d| d.is_empty()));
    }

    #[test]
    fn test_filled_cell_keeps_zero_on_y_axis() {
        let value = options(&cell_chart(&area_cell(&[100.0, 200.0])));
        let y_axis = first(&value["yAxis"]);

        assert_ne!(y_axis["scale"], Value::Bool(true));
        assert_eq!(y_axis["splitNumber"].as_f64(), Some(4.0));
        assert_eq!(y_axis["name"], "Cumulative Margin (₹)");

        let series = first(&value["series"]);
        assert_eq!(series["type"], "line");
        assert!(series["areaStyle"].is_object());
    }

    #[test]
    fn test_unfilled_cell_scales_y_axis_to_data() {
        let series = ChartSeries::from_parallel("Price vs. Quantity", &[29.0, 28.9, 29.0], &[105.0, 292.27, 102.72])
            .unwrap()
            .mode(SeriesMode::Markers)
            .marker_size(10.0);
        let cell = GridCell::new("Price vs. Quantity Lifted", "Price per Kg", "Quantity Lifted (MT)", vec![series]);
        let value = options(&cell_chart(&cell));

        assert_eq!(first(&value["yAxis"])["scale"], true);
        assert_eq!(first(&value["yAxis"])["splitNumber"].as_f64(), Some(4.0));
        assert_eq!(first(&value["xAxis"])["type"], "value");

        let series = first(&value["series"]);
        assert_eq!(series["type"], "scatter");
        assert_eq!(series["symbolSize"].as_f64(), Some(10.0));
        assert_eq!(series["data"][1], serde_json::json!([28.9, 292.27]));
        assert!(series.get("areaStyle").is_none());
    }

    #[test]
    fn test_category_axis_merges_repeated_labels() {
        let sales = ChartSeries::from_parallel(
            "Cumulative Sales",
            &["8/12/2024", "8/24/2024", "8/29/2024", "8/29/2024"],
            &[0.0, 1.0, 2.0, 3.0],
        )
        .unwrap()
        .fill(Fill::ToZeroY);
        let payments = ChartSeries::from_parallel("Cumulative Payments", &["8/30/2024"], &[4.0])
            .unwrap()
            .fill(Fill::ToZeroY);
        let cell = GridCell::new("Progression", "Dates", "Amount (₹)", vec![sales, payments]);
        let value = options(&cell_chart(&cell));

        let x_axis = first(&value["xAxis"]);
        assert_eq!(x_axis["type"], "category");
        assert_eq!(
            x_axis["data"],
            serde_json::json!(["8/12/2024", "8/24/2024", "8/29/2024", "8/30/2024"])
        );
        assert_eq!(x_axis["name"], "Dates");

        let series = value["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["data"][2][0], series[0]["data"][3][0]);
        assert_eq!(series[1]["data"][0], serde_json::json!([3.0, 4.0]));
    }

    #[test]
    fn test_empty_cell_uses_value_axes() {
        let cell = GridCell::new("Nothing", "x", "y", vec![]);
        let value = options(&cell_chart(&cell));
        assert_eq!(first(&value["xAxis"])["type"], "value");
    }
}
