//! LINRPC - line-delimited JSON-RPC 2.0 responder
//!
//! This is the convenience crate that re-exports the linrpc sub-crates.
//! Depend on it when you want a single dependency for building a
//! stdin/stdout JSON-RPC responder.
//!
//! # Architecture
//!
//! - **linrpc-core**: wire types, line codec, error taxonomy
//! - **linrpc-server**: handler registry, stream seams, request loop
//!
//! The crate also ships the `linrpc` binary: a responder with the two
//! example methods (`say_hello`, `process_path`) registered, reading
//! requests from stdin and writing responses to stdout, with
//! diagnostics in a log file selected via `LINRPC_LOG_FILE`.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use linrpc::server::{from_typed_fn, RequestLoop};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct GreetParams {
//!     #[serde(default)]
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> linrpc::Result<()> {
//!     RequestLoop::builder()
//!         .handler("greet", from_typed_fn(|p: GreetParams| async move {
//!             Ok(format!("Hello, {}!", p.name))
//!         }))
//!         .build()
//!         .run()
//!         .await
//! }
//! ```

// Re-export the sub-crates under stable module names.
pub use linrpc_core as rpc;
pub use linrpc_server as server;

// Most-used types at the crate root for convenience.
pub use linrpc_core::{codec, Error, ErrorObject, Id, Request, Response, Result};
pub use linrpc_server::{
    from_fn, from_typed_fn, DiagnosticsConfig, Handler, HandlerRegistry, RequestLoop,
};
