//! JSON-RPC 2.0 wire types for the line-delimited subset
//!
//! This module defines the two message shapes that cross the wire: one
//! [`Request`] per input line and one [`Response`] per output line. The
//! responder speaks a deliberate subset of JSON-RPC 2.0:
//!
//! - No notifications: every accepted request carries an `id`; a missing
//!   `id` decodes as `null` and is echoed back as `null`.
//! - No batches: a JSON array on a line is not a request object and is
//!   dropped by the codec.
//!
//! # Request IDs
//!
//! The `id` is an opaque correlation token chosen by the client. It is
//! echoed back verbatim with its JSON type preserved: a string id stays a
//! string, an integer id stays an integer, null stays null.

use crate::error::ErrorObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque request identifier, echoed back verbatim in the response.
///
/// Any JSON scalar is admitted: string, number (integer, fractional, or
/// beyond `i64` range, via [`serde_json::Number`]), boolean, or null.
/// The responder never interprets the value; it only copies it into the
/// matching response.
///
/// `#[serde(untagged)]` makes the enum serialize as the bare inner value,
/// so the wire representation is exactly what the client sent.
///
/// # Examples
///
/// ```rust
/// use linrpc_core::Id;
///
/// let id: Id = "req-7".into();
/// assert_eq!(id.to_string(), "\"req-7\"");
/// assert_eq!(Id::from(42i64).to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier, e.g. a UUID or a client-side correlation token
    String(String),
    /// Numeric identifier: integer, fractional, or outside `i64` range
    Number(serde_json::Number),
    /// Boolean identifier; unusual but a legal JSON scalar
    Bool(bool),
    /// Null identifier; also used when the request omitted `id`
    Null,
}

impl Default for Id {
    /// A request that omits `id` correlates as `null`, so that is the default.
    fn default() -> Self {
        Id::Null
    }
}

impl fmt::Display for Id {
    /// Format the id the way it appears on the wire: strings quoted,
    /// numbers bare, null as `null`. Used in log records.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Bool(b) => write!(f, "{}", b),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n.into())
    }
}

/// A decoded JSON-RPC 2.0 request, one per input line.
///
/// Created fresh when a line decodes successfully, immutable afterwards,
/// and discarded once the corresponding response has been written.
///
/// # Field semantics
///
/// - `jsonrpc` is the protocol version tag, expected to be `"2.0"`. The
///   responder neither rejects other values nor requires the field; an
///   object missing it decodes with `"2.0"` filled in. `method` is the
///   only key an object must carry to count as a request.
/// - `params` is an optional mapping of named arguments. Absence means
///   "no arguments", not an error; handlers see it as an empty mapping.
/// - A missing `id` decodes as [`Id::Null`] and is echoed back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version tag, expected `"2.0"`
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    /// Name of the handler to invoke
    pub method: String,
    /// Optional named arguments for the handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Correlation token, echoed back verbatim
    #[serde(default)]
    pub id: Id,
}

fn default_version() -> String {
    "2.0".to_string()
}

impl Request {
    /// Create a new request with the version tag filled in.
    ///
    /// Mostly useful in tests; the server side only ever decodes requests
    /// from input lines.
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>, id: Id) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// A JSON-RPC 2.0 response, one per successfully dispatched request.
///
/// Carries exactly one of `result` or `error`, never both and never
/// neither. The exclusion is enforced by construction: the only ways to
/// build a response are [`Response::success`] and [`Response::error`].
///
/// # Examples
///
/// ```rust
/// use linrpc_core::{ErrorObject, Id, Response};
/// use serde_json::json;
///
/// let ok = Response::success(json!("Hello, Ada!"), Id::from(1i64));
/// assert!(ok.is_success());
///
/// let failed = Response::error(ErrorObject::method_not_found("frobnicate"), Id::from(2i64));
/// assert!(failed.is_error());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version tag, always `"2.0"`
    pub jsonrpc: String,
    /// Handler result, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Structured error, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    /// Correlation token copied from the originating request
    pub id: Id,
}

impl Response {
    /// Build a success response carrying the handler's result.
    pub fn success(result: serde_json::Value, id: Id) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Build an error response carrying a structured error object.
    pub fn error(error: ErrorObject, id: Id) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// True if this response carries a `result`.
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// True if this response carries an `error`.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_display_matches_wire_form() {
        assert_eq!(Id::String("abc".to_string()).to_string(), "\"abc\"");
        assert_eq!(Id::from(7i64).to_string(), "7");
        assert_eq!(Id::Null.to_string(), "null");
    }

    #[test]
    fn id_type_round_trips_through_json() {
        for raw in ["\"req-1\"", "42", "1.5", "18446744073709551615", "true", "null"] {
            let id: Id = serde_json::from_str(raw).unwrap();
            assert_eq!(serde_json::to_string(&id).unwrap(), raw);
        }
    }

    #[test]
    fn request_decodes_without_params_or_id() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"say_hello"}"#).unwrap();
        assert_eq!(req.method, "say_hello");
        assert!(req.params.is_none());
        assert_eq!(req.id, Id::Null);
    }

    #[test]
    fn request_decodes_without_version_tag() {
        let req: Request = serde_json::from_str(r#"{"id":1,"method":"say_hello"}"#).unwrap();
        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.method, "say_hello");
        assert_eq!(req.id, Id::from(1i64));
    }

    #[test]
    fn request_missing_method_is_rejected() {
        let result = serde_json::from_str::<Request>(r#"{"jsonrpc":"2.0","id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn success_response_omits_error_field() {
        let resp = Response::success(json!("ok"), Id::from(1i64));
        let encoded = serde_json::to_string(&resp).unwrap();
        assert!(encoded.contains("\"result\":\"ok\""));
        assert!(!encoded.contains("\"error\""));
        assert!(resp.is_success());
        assert!(!resp.is_error());
    }

    #[test]
    fn error_response_omits_result_field() {
        let resp = Response::error(ErrorObject::internal_error("boom"), Id::Null);
        let encoded = serde_json::to_string(&resp).unwrap();
        assert!(encoded.contains("\"error\""));
        assert!(!encoded.contains("\"result\""));
        assert!(resp.is_error());
    }
}
