use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::{error::AppError, models::ForwardPayload};

mod client;
pub use client::build_client;

/// Response of the agent server for an accepted start request, relayed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn start_url(agent_server_url: &str) -> String {
    format!("{}/start", agent_server_url.trim_end_matches('/'))
}

/// Post `payload` to `{agent_server_url}/start` once and classify the outcome.
///
/// A missing base URL fails before any network call. Non-2xx responses with a
/// JSON body come back as [`AppError::Upstream`] so they can be relayed
/// verbatim; any other failure is reported as an internal error.
pub async fn forward_start_request(
    client: &reqwest::Client,
    agent_server_url: Option<&str>,
    payload: &ForwardPayload,
) -> Result<UpstreamReply, AppError> {
    let base_url = agent_server_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::Configuration("AGENT_SERVER_URL is not set".to_string()))?;

    let url = start_url(base_url);
    debug!(url = %url, "Forwarding start request");

    let started = Instant::now();
    let response = client.post(&url).json(payload).send().await.map_err(|e| {
        error!(url = %url, "Agent server request failed: {}", e);
        AppError::Transport(e)
    })?;

    let status = response.status();
    let bytes = response.bytes().await?;
    info!(
        url = %url,
        status = status.as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Agent server responded"
    );

    let body: Value = serde_json::from_slice(&bytes).map_err(|source| {
        error!(
            status = status.as_u16(),
            body_size = bytes.len(),
            "Agent server returned a non-JSON body"
        );
        AppError::InvalidUpstreamBody { status, source }
    })?;

    if status.is_success() {
        Ok(UpstreamReply { status, body })
    } else {
        Err(AppError::Upstream { status, body })
    }
}
