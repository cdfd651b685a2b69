use super::metrics::MetricsRegistry;
use super::RequestMetrics;
use crate::error::AppError;
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderValue, Request, Response},
    middleware::Next,
    response::IntoResponse,
};
use serde_json::Value;
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Largest request body buffered for a request; matches the extractor limit on the router.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Times each request, tags the response with a correlation id and hands a
/// [`RequestMetrics`] record to the registry.
pub async fn metrics_middleware(
    State(registry): State<Arc<MetricsRegistry>>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let path = req.uri().path().to_string();
    let method = req.method().to_string();
    debug!("Received request: path={}, method={}", path, method);

    let (parts, body) = req.into_parts();
    let (req_size, graph_name, response) = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => {
            let graph_name = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("graph_name").and_then(Value::as_str).map(str::to_string));
            let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %path);
            let response = next
                .run(Request::from_parts(parts, Body::from(bytes.clone())))
                .instrument(span)
                .await;
            (bytes.len(), graph_name, response)
        }
        Err(e) => {
            error!("Failed to read request body: {}", e);
            (0, None, AppError::BodyTooLarge(e).into_response())
        }
    };

    let (mut parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, value);
    }

    let status_code = parts.status.as_u16();
    let metrics = RequestMetrics {
        request_id,
        path,
        method,
        graph_name,
        total_latency: start.elapsed(),
        request_size: req_size,
        response_size: bytes.len(),
        status_code,
        error_count: u32::from(status_code >= 400),
    };
    registry.record_metrics(metrics).await;

    Response::from_parts(parts, Body::from(bytes))
}
