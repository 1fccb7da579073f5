//! The `linrpc` binary: stdio responder with the example methods
//!
//! Reads one JSON-RPC request per line from stdin, writes one response
//! per line to stdout, and appends diagnostics to the file named by
//! `LINRPC_LOG_FILE` (stderr when unset). Invoked with no arguments;
//! the two registered methods are example payloads, not core logic:
//!
//! - `say_hello`: optional string `name` (default `"World"`) →
//!   `"Hello, {name}!"`
//! - `process_path`: optional string `path` (default `""`) →
//!   `"Successfully processed path: {path}"`

use linrpc::server::{from_typed_fn, init_diagnostics, DiagnosticsConfig, RequestLoop};
use serde::Deserialize;

#[derive(Deserialize)]
struct SayHelloParams {
    #[serde(default = "default_name")]
    name: String,
}

fn default_name() -> String {
    "World".to_string()
}

#[derive(Deserialize)]
struct ProcessPathParams {
    #[serde(default)]
    path: String,
}

#[tokio::main]
async fn main() -> linrpc::Result<()> {
    // Keep the guard alive for the whole process so buffered log
    // records survive shutdown.
    let _guard = init_diagnostics(&DiagnosticsConfig::from_env())?;
    tracing::info!("linrpc responder started, waiting on stdin");

    let result = RequestLoop::builder()
        .handler(
            "say_hello",
            from_typed_fn(|p: SayHelloParams| async move {
                Ok(format!("Hello, {}!", p.name))
            }),
        )
        .handler(
            "process_path",
            from_typed_fn(|p: ProcessPathParams| async move {
                tracing::info!(path = %p.path, "processing path");
                Ok(format!("Successfully processed path: {}", p.path))
            }),
        )
        .build()
        .run()
        .await;

    match &result {
        Ok(()) => tracing::info!("responder finished"),
        Err(err) => tracing::error!(error = %err, "responder terminated on stream failure"),
    }
    result
}
