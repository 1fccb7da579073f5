//! The request loop: read line, decode, dispatch, write, flush
//!
//! One logical task, strictly sequential. Each input line is an
//! independent unit of work attempted exactly once: pull the line,
//! decode it into a request, resolve the handler, invoke it, write the
//! response line, flush. The only blocking point is waiting for the
//! next line.
//!
//! # Failure policy
//!
//! Per-request failures never escape the loop:
//!
//! - A line that fails to decode (invalid JSON, or JSON that is not a
//!   request object) is logged, reported once on the secondary error
//!   channel, and dropped without a response. The client sees nothing
//!   for that line and must rely on its own timeout.
//! - An unknown method is answered with a `-32601` error response
//!   carrying the request's `id`, so the client is not left waiting.
//! - A handler failure is answered with an error response (`-32602` for
//!   rejected params, `-32603` otherwise), logged with full context,
//!   and reported on the secondary error channel.
//!
//! Only a failure of the streams themselves propagates out of
//! [`RequestLoop::run`] and ends the process.
//!
//! # Response invariant
//!
//! Every successfully decoded request yields exactly one response line,
//! flushed before the next line is considered. Undecodable lines yield
//! zero response lines.

use crate::builder::ServerBuilder;
use crate::registry::HandlerRegistry;
use crate::transport::{ErrorSink, LineSink, LineSource};
use linrpc_core::{codec, ErrorObject, Request, Response, Result};

/// The single-threaded request/response loop over one stream pair.
///
/// Owns its registry and all three stream seams; nothing is shared.
/// Construct one via [`RequestLoop::builder`] and consume it with
/// [`RequestLoop::run`].
pub struct RequestLoop {
    registry: HandlerRegistry,
    source: Box<dyn LineSource>,
    sink: Box<dyn LineSink>,
    errors: Box<dyn ErrorSink>,
}

impl RequestLoop {
    /// Start building a loop. Defaults to stdin/stdout/stderr streams.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Assemble a loop from its parts. Prefer [`RequestLoop::builder`].
    pub fn new(
        registry: HandlerRegistry,
        source: Box<dyn LineSource>,
        sink: Box<dyn LineSink>,
        errors: Box<dyn ErrorSink>,
    ) -> Self {
        Self {
            registry,
            source,
            sink,
            errors,
        }
    }

    /// Run until the input stream signals end-of-input.
    ///
    /// Returns `Ok(())` on orderly shutdown. The only error this
    /// returns is a stream failure; every per-request error is absorbed
    /// inside the loop.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(methods = ?self.registry.methods(), "request loop started");

        while let Some(line) = self.source.next_line().await? {
            self.process_line(&line).await?;
        }

        tracing::info!("input stream closed, request loop exiting");
        Ok(())
    }

    /// Handle one input line end to end.
    ///
    /// Errors returned from here are stream failures only; everything
    /// else is converted to a diagnostic, an error report, and possibly
    /// an error response.
    async fn process_line(&mut self, line: &str) -> Result<()> {
        tracing::info!(line, "received line");

        let request = match codec::decode_line(line) {
            Ok(request) => request,
            Err(err) => {
                // Undecodable lines owe the client nothing: the id, if
                // one was even present, cannot be trusted.
                tracing::error!(line, error = %err, "dropping undecodable line");
                self.errors
                    .report(&format!("Error processing request: {}", err))
                    .await?;
                return Ok(());
            }
        };

        tracing::debug!(method = %request.method, id = %request.id, "decoded request");

        let response = self.dispatch(request).await?;
        let encoded = match codec::encode_response(&response) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::error!(id = %response.id, error = %err, "response failed to serialize");
                self.errors
                    .report(&format!("Error processing request: {}", err))
                    .await?;
                return Ok(());
            }
        };

        self.sink.write_line(&encoded).await?;
        tracing::info!(id = %response.id, "response written and flushed");
        Ok(())
    }

    /// Resolve and invoke the handler, producing exactly one response.
    ///
    /// Dispatch failures become error responses rather than dropped
    /// requests, so a client never waits forever on a well-formed line.
    async fn dispatch(&mut self, request: Request) -> Result<Response> {
        let Request {
            method, params, id, ..
        } = request;

        match self.registry.dispatch(&method, params).await {
            Ok(result) => {
                tracing::info!(method = %method, id = %id, "handler succeeded");
                Ok(Response::success(result, id))
            }
            Err(err) => {
                tracing::error!(method = %method, id = %id, error = %err, "dispatch failed");
                self.errors
                    .report(&format!("Error processing request: {}", err))
                    .await?;
                Ok(Response::error(ErrorObject::from(&err), id))
            }
        }
    }
}
