use crate::error::FetchError;
use serde_json::{Map, Value as JsonValue};

const MESSAGE_OK: &str = "ok";
const MESSAGE_NOT_FOUND: &str = "not found";

/// A recognized answer from the remote resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    /// `{"message": "ok", "result": {"properties": {...}}}`
    Found(Map<String, JsonValue>),
    /// HTTP 404, or `{"message": "not found"}`
    NotFound,
}

/// Maps a raw HTTP exchange onto a [`ResourcePayload`].
///
/// Anything that is neither the found shape nor the not-found shape is an
/// `UnexpectedShape` error, never `NotFound`.
pub fn classify(status: u16, url: &str, body: &[u8]) -> Result<ResourcePayload, FetchError> {
    if status == 404 {
        return Ok(ResourcePayload::NotFound);
    }

    if status == 429 || status >= 500 {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let json: JsonValue =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let message = json.get("message").and_then(JsonValue::as_str);
    match message {
        Some(m) if m.eq_ignore_ascii_case(MESSAGE_OK) => json
            .get("result")
            .and_then(|r| r.get("properties"))
            .and_then(JsonValue::as_object)
            .cloned()
            .map(ResourcePayload::Found)
            .ok_or_else(|| {
                FetchError::UnexpectedShape("'ok' response without result.properties".into())
            }),
        Some(m) if m.eq_ignore_ascii_case(MESSAGE_NOT_FOUND) => Ok(ResourcePayload::NotFound),
        Some(m) => Err(FetchError::UnexpectedShape(format!(
            "status {status}, message '{m}'"
        ))),
        None => Err(FetchError::UnexpectedShape(format!(
            "status {status}, no 'message' field"
        ))),
    }
}
