use crate::telemetry::{
    metrics::{ExportError, MetricsExporter},
    RequestMetrics,
};
use async_trait::async_trait;
use tracing::info;

pub struct ConsolePlugin;

impl ConsolePlugin {
    pub fn new() -> Self {
        ConsolePlugin
    }
}

impl Default for ConsolePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsExporter for ConsolePlugin {
    async fn export_metrics(&self, metrics: RequestMetrics) -> Result<(), ExportError> {
        info!(
            request_id = %metrics.request_id,
            method = %metrics.method,
            path = %metrics.path,
            graph_name = metrics.graph_name.as_deref().unwrap_or_default(),
            status = metrics.status_code,
            latency_ms = metrics.total_latency.as_millis() as u64,
            request_size = metrics.request_size,
            response_size = metrics.response_size,
            "request completed"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
