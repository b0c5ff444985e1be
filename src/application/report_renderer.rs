// Renderer trait - turns a finished report tree into a page
use crate::domain::error::ReportError;
use crate::domain::report::Report;

pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &Report) -> Result<String, ReportError>;

    fn content_type(&self) -> &'static str;
}
