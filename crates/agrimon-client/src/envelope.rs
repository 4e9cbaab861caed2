//! Decoding of `{ success, data, message }` response envelopes.

use crate::api::UploadReceipt;
use agrimon_common::{AgriError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response wrapper used by every analytics endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    /// False when the server reports a failure.
    #[serde(default)]
    pub success: Option<bool>,
    /// The actual payload
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Optional message (usually present on errors)
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// True unless the server said otherwise.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

/// Server message from an error body, if it carries one.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("success") || map.contains_key("data"))
}

/// Decode a success body into `T`.
///
/// Bodies wrapped in an envelope are unwrapped; any other body is taken as
/// the payload itself.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value = serde_json::from_str(body)?;
    if !is_envelope(&value) {
        return Ok(serde_json::from_value(value)?);
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_value(value)?;
    if !envelope.is_success() {
        return Err(AgriError::api(
            envelope
                .message
                .unwrap_or_else(|| "Request was not successful".to_string()),
        ));
    }
    let data = envelope
        .data
        .ok_or_else(|| AgriError::api("Response contained no data"))?;
    Ok(serde_json::from_value(data)?)
}

/// Decode the body of a 2xx upload reply.
///
/// The body must be JSON. An envelope with `success: false` is a rejection
/// even though the status was 2xx; a non-object body is kept as `data`.
pub fn decode_receipt(body: &str) -> Result<UploadReceipt> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Ok(UploadReceipt {
            message: None,
            data: value,
        });
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_value(value)?;
    if !envelope.is_success() {
        return Err(AgriError::api(
            envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Request was not successful".to_string()),
        ));
    }
    Ok(UploadReceipt {
        message: envelope.message,
        data: envelope.data.unwrap_or_default(),
    })
}
