use super::common::{
    gateway, gateway_with_config, post_start, post_start_raw, unreachable_base_url,
    MockAgentServer,
};
use agent_start_gateway::{config::AppConfig, telemetry::middleware::MAX_BODY_BYTES};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn internal_error() -> Value {
    json!({"code": "1", "data": null, "msg": "Internal Server Error"})
}

fn start_body() -> Value {
    json!({
        "request_id": "r1",
        "channel_name": "c1",
        "user_uid": "u1",
        "graph_name": "g1",
        "prompt_params": {"name": "John"}
    })
}

#[test_log::test(tokio::test)]
async fn upstream_error_is_relayed_verbatim() {
    let agent = MockAgentServer::start(StatusCode::NOT_FOUND, r#"{"error":"graph not found"}"#).await;
    let response = post_start(gateway(Some(agent.base_url.clone())), &start_body()).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "graph not found"}));
}

#[tokio::test]
async fn connection_refused_is_internal_error() {
    let response = post_start(gateway(Some(unreachable_base_url().await)), &start_body()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, internal_error());
}

#[tokio::test]
async fn missing_configuration_fails_regardless_of_body() {
    for body in [start_body().to_string(), "not json".to_string(), String::new()] {
        let response = post_start_raw(gateway(None), body).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, internal_error());
    }
}

#[tokio::test]
async fn non_json_upstream_error_is_internal_error() {
    let agent = MockAgentServer::start(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
    let response = post_start(gateway(Some(agent.base_url.clone())), &start_body()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, internal_error());
}

#[tokio::test]
async fn slow_upstream_times_out_as_internal_error() {
    let agent = MockAgentServer::start_with_delay(
        StatusCode::OK,
        r#"{"msg":"late"}"#,
        Duration::from_secs(2),
    )
    .await;
    let config = AppConfig::with_agent_server(Some(agent.base_url.clone()))
        .with_upstream_timeout(Duration::from_millis(200));

    let response = post_start(gateway_with_config(config), &start_body()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, internal_error());
}

#[tokio::test]
async fn malformed_body_is_rejected_without_forwarding() {
    let agent = MockAgentServer::start(StatusCode::OK, r#"{"msg":"ok"}"#).await;

    for body in [
        "{not json".to_string(),
        json!(["r1", "c1"]).to_string(),
        json!({"request_id": "r1", "properties": [1, 2]}).to_string(),
        json!({"request_id": "r1", "prompt_params": "name=John"}).to_string(),
    ] {
        let response = post_start_raw(gateway(Some(agent.base_url.clone())), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["code"], "1");
    }

    assert!(agent.received().await.is_empty());
}

#[tokio::test]
async fn prompt_params_into_non_object_v2v_is_rejected() {
    let agent = MockAgentServer::start(StatusCode::OK, r#"{"msg":"ok"}"#).await;
    let response = post_start(
        gateway(Some(agent.base_url.clone())),
        &json!({
            "request_id": "r1",
            "graph_name": "g1",
            "properties": {"v2v": "inline-config"},
            "prompt_params": {"name": "John"}
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({"code": "1", "data": null, "msg": "Bad Request"}));
    assert!(agent.received().await.is_empty());
}

#[tokio::test]
async fn oversized_body_gets_json_envelope() {
    let agent = MockAgentServer::start(StatusCode::OK, r#"{"msg":"ok"}"#).await;
    let padding = "x".repeat(MAX_BODY_BYTES + 1);
    let body = json!({"request_id": "r1", "graph_name": "g1", "properties": {"padding": padding}});

    let response = post_start(gateway(Some(agent.base_url.clone())), &body).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.body,
        json!({"code": "1", "data": null, "msg": "Payload Too Large"})
    );
    assert!(response.headers.contains_key("x-request-id"));
    assert!(agent.received().await.is_empty());
}

#[tokio::test]
async fn health_check_is_ok() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let response = gateway(None).oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}
