//! Line-delimited JSON-RPC 2.0 request loop
//!
//! This crate implements the responder side of a newline-delimited
//! JSON-RPC protocol: one request object per input line, one response
//! object per output line, flushed per message. It is intrinsically 1:1
//! with a single input/output stream pair; scaling to concurrent clients
//! means running one loop instance per pair, not sharing one.
//!
//! # Components
//!
//! - [`Handler`] and the [`from_fn`] / [`from_typed_fn`] adapters
//! - [`HandlerRegistry`]: the immutable method dispatch table
//! - [`LineSource`] / [`LineSink`] / [`ErrorSink`]: injected stream
//!   seams with stdio and in-memory implementations
//! - [`RequestLoop`]: the read-decode-dispatch-write-flush loop
//! - [`DiagnosticsConfig`] / [`init_diagnostics`]: the structured log
//!
//! # Quick start
//!
//! ```rust,no_run
//! use linrpc_server::{from_typed_fn, DiagnosticsConfig, RequestLoop};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct GreetParams {
//!     #[serde(default)]
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> linrpc_core::Result<()> {
//!     let _guard = linrpc_server::init_diagnostics(&DiagnosticsConfig::from_env())?;
//!
//!     RequestLoop::builder()
//!         .handler("greet", from_typed_fn(|p: GreetParams| async move {
//!             Ok(format!("Hello, {}!", p.name))
//!         }))
//!         .build()
//!         .run()
//!         .await
//! }
//! ```
//!
//! # Failure model
//!
//! Nothing in the loop is retried and nothing per-request is fatal. A
//! line that fails to decode is dropped with a diagnostic; a request
//! naming an unknown method or a failing handler is answered with a
//! JSON-RPC error response. Only the streams themselves breaking ends
//! the process.

mod builder;
mod diagnostics;
mod handler;
mod registry;
mod request_loop;
mod transport;

pub use builder::ServerBuilder;
pub use diagnostics::{init_diagnostics, DiagnosticsConfig};
pub use handler::{from_fn, from_typed_fn, FnHandler, Handler, HandlerFuture};
pub use registry::{HandlerRegistry, RegistryBuilder};
pub use request_loop::RequestLoop;
pub use transport::{
    ErrorSink, LineSink, LineSource, MemoryErrorSink, MemoryLineSink, MemoryLineSource,
    ReaderLineSource, WriterErrorSink, WriterLineSink,
};
