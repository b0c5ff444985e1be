// Source trait for report inputs
use crate::domain::input::ReportInput;
use async_trait::async_trait;

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Load the full set of inputs for one render pass
    async fn load(&self) -> anyhow::Result<ReportInput>;
}
