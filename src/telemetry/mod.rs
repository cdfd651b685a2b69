pub mod exporters;
pub mod metrics;
pub mod middleware;
pub mod plugins;

pub use self::{
    exporters::prometheus::PrometheusExporter,
    metrics::{MetricsExporter, MetricsRegistry},
    middleware::metrics_middleware,
    plugins::ConsolePlugin,
};

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMetrics {
    // Request metadata
    pub request_id: String,
    pub path: String,
    pub method: String,
    pub graph_name: Option<String>,

    // Timing
    pub total_latency: Duration,

    // Sizes
    pub request_size: usize,
    pub response_size: usize,

    // Status
    pub status_code: u16,
    pub error_count: u32,
}
