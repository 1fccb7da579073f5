//! Line codec: one JSON value per line, no other framing
//!
//! The transport is newline-delimited JSON: each input line must hold one
//! complete request object, and each response is serialized to a single
//! line. There is no length-prefixing and no batching; a JSON array on a
//! line is rejected as an invalid request, not unpacked.
//!
//! # Two-stage decoding
//!
//! [`decode_line`] parses in two steps so the caller can tell the failure
//! modes apart:
//!
//! 1. Parse the line as generic JSON. Failure is [`Error::Parse`].
//! 2. Require a JSON object and deserialize it into a [`Request`].
//!    Failure is [`Error::InvalidRequest`].
//!
//! Both failures mean the line is dropped without a response; the
//! distinction only matters for diagnostics and tests.

use crate::error::{Error, Result};
use crate::types::{Request, Response};

/// Decode one input line into a [`Request`].
///
/// # Errors
///
/// - [`Error::Parse`] if the line is not valid JSON.
/// - [`Error::InvalidRequest`] if the line is valid JSON but not an
///   object, or an object that does not match the request shape (for
///   example, missing `method`).
///
/// # Examples
///
/// ```rust
/// use linrpc_core::codec;
///
/// let req = codec::decode_line(r#"{"jsonrpc":"2.0","id":1,"method":"say_hello"}"#).unwrap();
/// assert_eq!(req.method, "say_hello");
///
/// assert!(codec::decode_line("not json at all").is_err());
/// assert!(codec::decode_line("[1,2,3]").is_err());
/// ```
pub fn decode_line(line: &str) -> Result<Request> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| Error::Parse(e.to_string()))?;

    if !value.is_object() {
        return Err(Error::InvalidRequest(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| Error::InvalidRequest(e.to_string()))
}

/// Encode a [`Response`] as a single line of JSON (without the trailing
/// newline; the sink appends it).
///
/// # Errors
///
/// Returns [`Error::Serialization`] if the result value cannot be
/// rendered as JSON. `serde_json` values always can, so this only fires
/// for handler results with non-JSON-representable content (e.g. a map
/// with non-string keys smuggled in via `data`).
pub fn encode_response(response: &Response) -> Result<String> {
    serde_json::to_string(response).map_err(|e| Error::Serialization(e.to_string()))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
