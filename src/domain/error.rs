// Report errors
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    /// Parallel input lists of a chart do not line up.
    #[error("series '{series}' has {x_len} x values but {y_len} y values")]
    LengthMismatch {
        series: String,
        x_len: usize,
        y_len: usize,
    },

    #[error("invalid percentage '{0}'")]
    InvalidPercentage(String),

    #[error("render failed: {0}")]
    Render(String),
}
