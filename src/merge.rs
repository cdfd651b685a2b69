use serde_json::Value;

use crate::{
    error::AppError,
    models::{PromptParams, Properties, V2vConfig},
};

/// Nest `prompt_params` under `properties.v2v.prompt_params`.
///
/// Sibling keys of `properties` and of `v2v` are kept; an existing
/// `v2v.prompt_params` is replaced as a whole, never merged field by field.
/// Absent or empty `prompt_params` leave `properties` untouched, whatever
/// `v2v` holds. Injecting into a `v2v` that is neither absent, `null` nor an
/// object is an [`AppError::InvalidProperties`].
///
/// Returns `None` when the result has no keys, so the caller can omit the
/// field instead of sending an empty object.
pub fn merge_prompt_params(
    properties: Option<Properties>,
    prompt_params: Option<PromptParams>,
) -> Result<Option<Properties>, AppError> {
    let mut merged = properties.unwrap_or_default();

    if let Some(params) = prompt_params.filter(|p| !p.is_empty()) {
        let mut extra = match merged.v2v.take() {
            None | Some(Value::Null) => Default::default(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(AppError::InvalidProperties(format!(
                    "properties.v2v must be an object to carry prompt_params, got {}",
                    json_type(&other)
                )))
            }
        };
        extra.remove("prompt_params");
        let v2v = V2vConfig {
            prompt_params: params,
            extra,
        };
        merged.v2v = Some(v2v.into_value());
    }

    if merged.is_empty() {
        Ok(None)
    } else {
        Ok(Some(merged))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
