// Application layer - Report use cases
pub mod metrics;
pub mod report_builder;
pub mod report_renderer;
pub mod report_service;
pub mod report_source;
