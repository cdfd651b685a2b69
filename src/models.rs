use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Template variables substituted into the agent prompt at session start.
pub type PromptParams = Map<String, Value>;

/// Body of an inbound start-session request.
#[derive(Debug, Clone, Deserialize)]
pub struct StartRequest {
    pub request_id: Option<String>,
    pub channel_name: Option<String>,
    pub user_uid: Option<UserUid>,
    pub graph_name: Option<String>,
    // Accepted for compatibility with the playground client; not forwarded.
    pub language: Option<String>,
    pub voice_type: Option<String>,
    pub properties: Option<Properties>,
    pub prompt_params: Option<PromptParams>,
}

/// User identifiers arrive either as strings or as numbers and are forwarded as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserUid {
    Number(Number),
    Text(String),
}

/// Graph properties sent to the orchestration service.
///
/// `v2v` is kept as raw JSON until prompt parameters are injected into it, and
/// every other key is carried through `extra`, so values this gateway does not
/// interpret (including explicit `null`s) reach the orchestration service as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub v2v: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.v2v.is_none() && self.extra.is_empty()
    }
}

// `Option<Value>` would read `null` as absent; a present key stays `Some`, even when null.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// The `v2v` section once prompt parameters have been set on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct V2vConfig {
    pub prompt_params: PromptParams,
    pub extra: Map<String, Value>,
}

impl V2vConfig {
    pub fn into_value(self) -> Value {
        let mut map = self.extra;
        map.insert("prompt_params".to_string(), Value::Object(self.prompt_params));
        Value::Object(map)
    }
}

/// Body posted to `{agent_server_url}/start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_uid: Option<UserUid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl ForwardPayload {
    pub fn new(request: StartRequest, properties: Option<Properties>) -> Self {
        Self {
            request_id: request.request_id,
            channel_name: request.channel_name,
            user_uid: request.user_uid,
            graph_name: request.graph_name,
            properties,
        }
    }
}
