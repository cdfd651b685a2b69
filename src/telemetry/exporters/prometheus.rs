use crate::telemetry::{
    metrics::{ExportError, MetricsExporter},
    RequestMetrics,
};
use async_trait::async_trait;
use metrics::{counter, gauge, histogram};

pub struct PrometheusExporter {
    namespace: String,
}

impl PrometheusExporter {
    pub fn new(namespace: String) -> Self {
        Self { namespace }
    }
}

#[async_trait]
impl MetricsExporter for PrometheusExporter {
    async fn export_metrics(&self, metrics: RequestMetrics) -> Result<(), ExportError> {
        let labels = [
            ("path", metrics.path.clone()),
            ("method", metrics.method.clone()),
            ("graph_name", metrics.graph_name.clone().unwrap_or_default()),
            ("status", metrics.status_code.to_string()),
        ];

        let name = format!("{}_request_latency", self.namespace);
        histogram!(name, &labels).record(metrics.total_latency.as_secs_f64());

        let name = format!("{}_request_size", self.namespace);
        gauge!(name, &labels).set(metrics.request_size as f64);

        let name = format!("{}_response_size", self.namespace);
        gauge!(name, &labels).set(metrics.response_size as f64);

        let name = format!("{}_requests_total", self.namespace);
        counter!(name, &labels).increment(1);

        let name = format!("{}_error_count", self.namespace);
        counter!(name, &labels).increment(metrics.error_count as u64);

        Ok(())
    }

    fn name(&self) -> &str {
        "prometheus"
    }
}
