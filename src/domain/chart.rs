// Chart domain models
use super::error::ReportError;
use serde::Serialize;

/// An x position: either a category label or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Category(String),
    Number(f64),
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Category(value.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Category(value)
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: AxisValue,
    pub y: f64,
}

/// Lines with markers are drawn as a line series, markers alone as a scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    LinesMarkers,
    Markers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    None,
    ToZeroY,
}

pub const DEFAULT_MARKER_SIZE: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub mode: SeriesMode,
    pub fill: Fill,
    pub color: String,
    pub marker_size: f64,
    pub points: Vec<Point>,
}

impl ChartSeries {
    /// Zip parallel x/y lists into a series. Lists of different length are rejected.
    pub fn from_parallel<X>(
        name: impl Into<String>,
        xs: &[X],
        ys: &[f64],
    ) -> Result<Self, ReportError>
    where
        X: Clone + Into<AxisValue>,
    {
        let name = name.into();
        if xs.len() != ys.len() {
            return Err(ReportError::LengthMismatch {
                series: name,
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }

        let points = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| Point {
                x: x.clone().into(),
                y: *y,
            })
            .collect();

        Ok(Self {
            name,
            mode: SeriesMode::LinesMarkers,
            fill: Fill::None,
            color: "#5A9BD5".to_string(),
            marker_size: DEFAULT_MARKER_SIZE,
            points,
        })
    }

    pub fn mode(mut self, mode: SeriesMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// Fraction of the radius left empty in the middle.
    pub hole: f64,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn from_parallel(
        title: impl Into<String>,
        labels: &[String],
        values: &[f64],
        colors: &[String],
    ) -> Result<Self, ReportError> {
        let title = title.into();
        if labels.len() != values.len() {
            return Err(ReportError::LengthMismatch {
                series: title,
                x_len: labels.len(),
                y_len: values.len(),
            });
        }
        if colors.len() != values.len() {
            return Err(ReportError::LengthMismatch {
                series: format!("{} colors", title),
                x_len: colors.len(),
                y_len: values.len(),
            });
        }

        let slices = labels
            .iter()
            .zip(values)
            .zip(colors)
            .map(|((label, value), color)| PieSlice {
                label: label.clone(),
                value: *value,
                color: color.clone(),
            })
            .collect();

        Ok(Self {
            title,
            hole: 0.0,
            slices,
        })
    }

    pub fn hole(mut self, hole: f64) -> Self {
        self.hole = hole.clamp(0.0, 0.95);
        self
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Pie charts laid out side by side under one figure title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieFigure {
    pub title: String,
    pub height: u32,
    pub width: u32,
    pub charts: Vec<PieChart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub series: Vec<ChartSeries>,
}

impl GridCell {
    pub fn new(
        title: impl Into<String>,
        x_axis_title: impl Into<String>,
        y_axis_title: impl Into<String>,
        series: Vec<ChartSeries>,
    ) -> Self {
        Self {
            title: title.into(),
            x_axis_title: x_axis_title.into(),
            y_axis_title: y_axis_title.into(),
            series,
        }
    }
}

/// A fixed 2x2 arrangement of plots, indexed `cells[row][col]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridFigure {
    pub title: String,
    pub height: u32,
    pub width: u32,
    pub cells: [[GridCell; 2]; 2],
}

impl GridFigure {
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_from_parallel_rejects_mismatch() {
        let err = ChartSeries::from_parallel("Cumulative Sales", &["8/12/2024", "8/24/2024"], &[1.0])
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::LengthMismatch {
                series: "Cumulative Sales".to_string(),
                x_len: 2,
                y_len: 1,
            }
        );
    }

    #[test]
    fn test_series_keeps_order() {
        let series = ChartSeries::from_parallel("Price vs. Quantity", &[29.0, 28.9], &[105.0, 292.27])
            .unwrap()
            .mode(SeriesMode::Markers);
        assert_eq!(series.points[1].x, AxisValue::Number(28.9));
        assert_eq!(series.ys(), vec![105.0, 292.27]);
        assert_eq!(series.mode, SeriesMode::Markers);
        assert_eq!(series.fill, Fill::None);
    }

    #[test]
    fn test_pie_checks_colors() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let colors = vec!["#000".to_string()];
        let err = PieChart::from_parallel("Pie", &labels, &[1.0, 2.0], &colors).unwrap_err();
        assert!(matches!(err, ReportError::LengthMismatch { x_len: 1, y_len: 2, .. }));
    }

    #[test]
    fn test_pie_hole_is_clamped() {
        let pie = PieChart::from_parallel("Pie", &[], &[], &[]).unwrap().hole(3.0);
        assert_eq!(pie.hole, 0.95);
        assert_eq!(pie.total(), 0.0);
    }
}
