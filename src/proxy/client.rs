use crate::{config::AppConfig, error::AppError};
use std::time::Duration;

/// Outbound client shared by all requests. The overall timeout bounds how long a
/// start request can wait on the agent server.
pub fn build_client(config: &AppConfig) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(32)
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(config.upstream_timeout)
        .build()
        .map_err(AppError::ClientBuild)
}
