use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    config::AppConfig,
    error::AppError,
    merge::merge_prompt_params,
    models::{ForwardPayload, StartRequest},
    proxy::{build_client, forward_start_request, UpstreamReply},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, AppError> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn start_agent(State(state): State<AppState>, body: Bytes) -> Response {
    match start_agent_session(&state, &body).await {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            match &e {
                AppError::Upstream { status, .. } => {
                    warn!("Agent server rejected start request with {}", status)
                }
                _ => error!("Start request failed: {}", e),
            }
            e.into_response()
        }
    }
}

async fn start_agent_session(state: &AppState, body: &[u8]) -> Result<UpstreamReply, AppError> {
    // Checked before the body so a misconfigured gateway fails the same way for every request.
    let agent_server_url = state
        .config
        .agent_server_url
        .as_deref()
        .ok_or_else(|| AppError::Configuration("AGENT_SERVER_URL is not set".to_string()))?;

    let mut request: StartRequest =
        serde_json::from_slice(body).map_err(AppError::InvalidRequest)?;

    info!(
        request_id = request.request_id.as_deref().unwrap_or_default(),
        channel_name = request.channel_name.as_deref().unwrap_or_default(),
        graph_name = request.graph_name.as_deref().unwrap_or_default(),
        "Starting agent session"
    );
    debug!(
        "prompt_params: {}",
        serde_json::to_string(&request.prompt_params).unwrap_or_default()
    );

    let properties =
        merge_prompt_params(request.properties.take(), request.prompt_params.take())?;
    debug!(
        "merged properties: {}",
        serde_json::to_string(&properties).unwrap_or_default()
    );

    let payload = ForwardPayload::new(request, properties);
    forward_start_request(&state.client, Some(agent_server_url), &payload).await
}
