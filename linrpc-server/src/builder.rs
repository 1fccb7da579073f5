//! Builder for assembling a request loop
//!
//! The builder wires the four parts of a [`RequestLoop`] together:
//! handlers, line source, line sink, and error sink. Streams default to
//! the real process streams (stdin, stdout, stderr); tests swap in the
//! in-memory doubles.
//!
//! # Examples
//!
//! ```rust,no_run
//! use linrpc_server::{from_fn, RequestLoop};
//!
//! #[tokio::main]
//! async fn main() -> linrpc_core::Result<()> {
//!     RequestLoop::builder()
//!         .handler("ping", from_fn(|_| async { Ok(serde_json::json!("pong")) }))
//!         .build()
//!         .run()
//!         .await
//! }
//! ```

use crate::handler::Handler;
use crate::registry::{HandlerRegistry, RegistryBuilder};
use crate::request_loop::RequestLoop;
use crate::transport::{
    ErrorSink, LineSink, LineSource, ReaderLineSource, WriterErrorSink, WriterLineSink,
};

/// Fluent configuration for a [`RequestLoop`].
#[derive(Default)]
pub struct ServerBuilder {
    registry: RegistryBuilder,
    source: Option<Box<dyn LineSource>>,
    sink: Option<Box<dyn LineSink>>,
    errors: Option<Box<dyn ErrorSink>>,
}

impl ServerBuilder {
    /// Create a builder with no handlers and default streams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a method.
    pub fn handler(mut self, method: impl Into<String>, handler: Box<dyn Handler>) -> Self {
        self.registry = self.registry.handler(method, handler);
        self
    }

    /// Replace the input stream (default: stdin).
    pub fn source(mut self, source: Box<dyn LineSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the response stream (default: stdout).
    pub fn sink(mut self, sink: Box<dyn LineSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the secondary error channel (default: stderr).
    pub fn error_sink(mut self, errors: Box<dyn ErrorSink>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Freeze the registry and assemble the loop.
    pub fn build(self) -> RequestLoop {
        let registry: HandlerRegistry = self.registry.build();
        RequestLoop::new(
            registry,
            self.source
                .unwrap_or_else(|| Box::new(ReaderLineSource::stdin())),
            self.sink
                .unwrap_or_else(|| Box::new(WriterLineSink::stdout())),
            self.errors
                .unwrap_or_else(|| Box::new(WriterErrorSink::stderr())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::from_fn;
    use crate::transport::{MemoryErrorSink, MemoryLineSink, MemoryLineSource};

    #[tokio::test]
    async fn builder_wires_handlers_and_streams() {
        let sink = MemoryLineSink::new();
        let out = sink.buffer();

        ServerBuilder::new()
            .handler("ping", from_fn(|_| async { Ok(serde_json::json!("pong")) }))
            .source(Box::new(MemoryLineSource::new([
                r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            ])))
            .sink(Box::new(sink))
            .error_sink(Box::new(MemoryErrorSink::new()))
            .build()
            .run()
            .await
            .unwrap();

        let out = out.lock().unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("\"result\":\"pong\""));
    }
}
