//! Core JSON-RPC 2.0 types and line codec for linrpc
//!
//! This crate provides the foundation for the line-delimited responder:
//!
//! - **Types**: the request/response wire shapes and the opaque request id
//! - **Codec**: one-JSON-object-per-line decoding and encoding
//! - **Errors**: a per-stage error taxonomy plus the wire-format error object
//!
//! # Protocol subset
//!
//! The transport is newline-delimited JSON over a single byte-stream pair
//! (stdin for requests, stdout for responses). Batches and notifications
//! are deliberately out of scope; each line holds exactly one request
//! object, and each well-formed request that reaches a handler yields
//! exactly one response line.
//!
//! The crate is transport-agnostic: it never touches a stream itself.
//! `linrpc-server` builds the request loop on top of it.
//!
//! # Example
//!
//! ```rust
//! use linrpc_core::{codec, Id, Response};
//! use serde_json::json;
//!
//! let request = codec::decode_line(
//!     r#"{"jsonrpc":"2.0","id":1,"method":"say_hello","params":{"name":"Ada"}}"#,
//! ).unwrap();
//! assert_eq!(request.method, "say_hello");
//!
//! let response = Response::success(json!("Hello, Ada!"), request.id);
//! let line = codec::encode_response(&response).unwrap();
//! assert!(line.contains("Hello, Ada!"));
//! ```

pub mod codec;
pub mod error;
pub mod types;

// Re-export the common types so callers can write `linrpc_core::Error`
// instead of `linrpc_core::error::Error`.
pub use error::{Error, ErrorObject, Result};
pub use types::{Id, Request, Response};
