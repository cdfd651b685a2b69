use dotenv::dotenv;
use std::{env, str::FromStr, time::Duration};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    pub worker_threads: usize,
    /// Base URL of the agent orchestration service. Requests fail with a
    /// configuration error while this is unset.
    pub agent_server_url: Option<String>,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn new() -> Self {
        dotenv().ok();

        Self {
            port: parse_or("PORT", 3000),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            worker_threads: parse_or("WORKER_THREADS", num_cpus::get()),
            agent_server_url: non_empty(env::var("AGENT_SERVER_URL").ok()),
            upstream_timeout: Duration::from_secs(parse_positive_or("AGENT_SERVER_TIMEOUT_SECS", 30)),
        }
    }

    /// Build a config pointing at the given orchestration service, with defaults
    /// for everything else. Used when embedding the router.
    pub fn with_agent_server(agent_server_url: Option<String>) -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
            worker_threads: num_cpus::get(),
            agent_server_url: non_empty(agent_server_url),
            upstream_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TelemetryConfig {
    pub debug_mode: bool,
    pub prometheus_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            debug_mode: flag("TELEMETRY_DEBUG"),
            prometheus_enabled: flag("ENABLE_PROMETHEUS"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn parse_positive_or(key: &str, default: u64) -> u64 {
    match parse_or(key, default) {
        0 => {
            warn!("{} must be greater than zero, using default {}", key, default);
            default
        }
        value => value,
    }
}
