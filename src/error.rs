use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Agent server responded with {status}")]
    Upstream { status: StatusCode, body: Value },

    #[error("Request to agent server failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Agent server returned a non-JSON body with status {status}: {source}")]
    InvalidUpstreamBody {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid start request body: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("Invalid start request properties: {0}")]
    InvalidProperties(String),

    #[error("Request body could not be read within the size limit: {0}")]
    BodyTooLarge(#[source] axum::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Body returned for every failure whose detail must not reach the caller.
pub fn internal_error_body() -> Value {
    json!({ "code": "1", "data": null, "msg": "Internal Server Error" })
}

fn bad_request_body() -> Value {
    json!({ "code": "1", "data": null, "msg": "Bad Request" })
}

fn payload_too_large_body() -> Value {
    json!({ "code": "1", "data": null, "msg": "Payload Too Large" })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Upstream { status, body } => (status, body),
            AppError::InvalidRequest(_) | AppError::InvalidProperties(_) => {
                (StatusCode::BAD_REQUEST, bad_request_body())
            }
            AppError::BodyTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, payload_too_large_body()),
            AppError::Configuration(_)
            | AppError::Transport(_)
            | AppError::InvalidUpstreamBody { .. }
            | AppError::ClientBuild(_) => (StatusCode::INTERNAL_SERVER_ERROR, internal_error_body()),
        };

        (status, Json(body)).into_response()
    }
}
