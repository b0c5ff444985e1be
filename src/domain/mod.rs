// Domain layer - Report data and display model
pub mod chart;
pub mod error;
pub mod input;
pub mod metric;
pub mod report;
pub mod sales;
