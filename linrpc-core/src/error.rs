//! Error taxonomy for the line-delimited responder
//!
//! Two error types live here:
//!
//! - [`Error`] is the application-level taxonomy used throughout the
//!   crates. Each per-line failure mode gets its own variant so the
//!   request loop can decide stage by stage what to do, instead of the
//!   catch-all branch the protocol's earliest implementations used.
//! - [`ErrorObject`] is the wire-format error carried in the `error`
//!   field of a response, with the standard JSON-RPC 2.0 codes.
//!
//! # Recoverable vs. fatal
//!
//! Every variant except [`Error::Stream`] describes a single bad request
//! and is absorbed at the loop boundary: it is logged, possibly answered
//! with an error response, and the loop moves on. `Stream` means the
//! input or output stream itself broke; it propagates and ends the
//! process.
//!
//! # Standard error codes
//!
//! - `-32700` parse error (line is not valid JSON)
//! - `-32600` invalid request (valid JSON, but not a request object)
//! - `-32601` method not found
//! - `-32602` invalid params
//! - `-32603` internal error

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used throughout the linrpc crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-level error for every stage of the per-line pipeline.
///
/// The variants mirror the pipeline stages: decode (`Parse`,
/// `InvalidRequest`), dispatch (`MethodNotFound`), handler execution
/// (`InvalidParams`, `Internal`), encode (`Serialization`), and the
/// streams themselves (`Stream`).
#[derive(Debug, Error)]
pub enum Error {
    /// Input line is not valid JSON. No response is owed for this line.
    #[error("parse error: {0}")]
    Parse(String),

    /// Input line is valid JSON but not a request object (an array, a
    /// bare scalar, or an object missing required fields). No response
    /// is owed for this line.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request's method has no registered handler. Answered with a
    /// `-32601` error response.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// The handler rejected its parameters. Answered with `-32602`.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// The handler failed while producing a result. Answered with `-32603`.
    #[error("internal error: {0}")]
    Internal(String),

    /// A value could not be serialized to JSON. Logged; no response.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The input or output stream is unusable. Fatal: propagates out of
    /// the request loop and ends the process.
    #[error("stream failure: {0}")]
    Stream(#[from] std::io::Error),
}

impl Error {
    /// True for failures that must end the process rather than be
    /// absorbed at the per-line boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Stream(_))
    }

    /// True for decode-stage failures, which drop the line without a
    /// response (the request's `id`, if any, was never trustworthy).
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::InvalidRequest(_))
    }
}

/// Wire-format error object, the value of a response's `error` field.
///
/// Contains a numeric `code`, a short human-readable `message`, and
/// optionally structured `data` with more context.
///
/// # Examples
///
/// ```rust
/// use linrpc_core::ErrorObject;
///
/// let err = ErrorObject::method_not_found("frobnicate");
/// assert_eq!(err.code, -32601);
/// assert!(err.message.contains("frobnicate"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code; the -327xx range is reserved by JSON-RPC 2.0
    pub code: i32,
    /// Short human-readable description
    pub message: String,
    /// Optional structured context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    /// Create an error object with an arbitrary code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attach structured context to the error.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Parse error (`-32700`): the server received invalid JSON.
    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    /// Invalid request (`-32600`): valid JSON that is not a request object.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(-32600, msg)
    }

    /// Method not found (`-32601`): no handler registered under this name.
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    /// Invalid params (`-32602`): the handler rejected its parameters.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(-32602, msg)
    }

    /// Internal error (`-32603`): the handler failed to produce a result.
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(-32603, msg)
    }
}

impl std::fmt::Display for ErrorObject {
    /// Formats as `[code] message` for log records.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorObject {}

impl From<&Error> for ErrorObject {
    /// Map an application error to its wire-format counterpart.
    ///
    /// Decode-stage and stream failures never reach the wire (the loop
    /// drops the line or dies, respectively), but the mapping is total
    /// so callers never have to panic.
    fn from(err: &Error) -> Self {
        match err {
            Error::Parse(_) => ErrorObject::parse_error(),
            Error::InvalidRequest(msg) => ErrorObject::invalid_request(msg.clone()),
            Error::MethodNotFound(method) => ErrorObject::method_not_found(method.clone()),
            Error::InvalidParams(msg) => ErrorObject::invalid_params(msg.clone()),
            Error::Internal(msg) => ErrorObject::internal_error(msg.clone()),
            Error::Serialization(msg) => ErrorObject::internal_error(msg.clone()),
            Error::Stream(e) => ErrorObject::internal_error(e.to_string()),
        }
    }
}
