// Application state for HTTP handlers
use crate::application::report_service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
    pub compress: bool,
}
