//! Injected stream seams: line source, line sink, error sink
//!
//! The request loop never touches stdin or stdout directly. It pulls
//! lines from a [`LineSource`], writes response lines to a [`LineSink`],
//! and reports caught failures to an [`ErrorSink`] (the secondary,
//! plain-text error channel, distinct from both the response stream and
//! the diagnostic log).
//!
//! Each seam has two implementations: one over real process streams and
//! an in-memory double, so the whole loop runs under test against a
//! scripted input sequence without spawning a process.
//!
//! # Flushing
//!
//! A sink flushes after every line. Each response is a discrete message,
//! and the client on the other end of the pipe must observe it without
//! delay; output is never allowed to sit in a buffer indefinitely.

use async_trait::async_trait;
use linrpc_core::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stderr, Stdin,
    Stdout,
};

/// Pull-based supply of input lines.
///
/// `next_line` blocks until a line arrives and returns `Ok(None)` once
/// the stream signals end-of-input, which ends the request loop. An
/// `Err` means the stream itself broke and is fatal.
#[async_trait]
pub trait LineSource: Send {
    /// Pull the next line, without its trailing newline.
    async fn next_line(&mut self) -> Result<Option<String>>;
}

/// Destination for response lines.
#[async_trait]
pub trait LineSink: Send {
    /// Write one line followed by a newline and flush immediately.
    async fn write_line(&mut self, line: &str) -> Result<()>;
}

/// The secondary error channel: one human-readable line per caught
/// failure, independent of the structured diagnostic log.
#[async_trait]
pub trait ErrorSink: Send {
    /// Report one failure as a single plain-text line.
    async fn report(&mut self, message: &str) -> Result<()>;
}

/// [`LineSource`] over any buffered async reader.
pub struct ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    lines: Lines<R>,
}

impl ReaderLineSource<BufReader<Stdin>> {
    /// Line source over the process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Wrap a buffered reader as a line source.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R> LineSource for ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

/// [`LineSink`] over any async writer, flushing per line.
pub struct WriterLineSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    writer: W,
}

impl WriterLineSink<Stdout> {
    /// Line sink over the process's standard output.
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> WriterLineSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wrap a writer as a line sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W> LineSink for WriterLineSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// [`ErrorSink`] over any async writer, flushing per report.
pub struct WriterErrorSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    writer: W,
}

impl WriterErrorSink<Stderr> {
    /// Error sink over the process's standard error.
    pub fn stderr() -> Self {
        Self::new(tokio::io::stderr())
    }
}

impl<W> WriterErrorSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wrap a writer as an error sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W> ErrorSink for WriterErrorSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn report(&mut self, message: &str) -> Result<()> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// In-memory [`LineSource`] serving a scripted sequence of lines.
///
/// Exhausting the sequence signals end-of-input, which is how tests
/// exercise the orderly-shutdown path.
pub struct MemoryLineSource {
    lines: VecDeque<String>,
}

impl MemoryLineSource {
    /// Build a source that yields the given lines in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl LineSource for MemoryLineSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// In-memory [`LineSink`] collecting written lines for inspection.
///
/// The backing buffer is shared: call [`MemoryLineSink::buffer`] before
/// handing the sink to the loop, then read the buffer after the loop
/// finishes.
#[derive(Default)]
pub struct MemoryLineSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLineSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected lines.
    pub fn buffer(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.lines)
    }
}

#[async_trait]
impl LineSink for MemoryLineSink {
    async fn write_line(&mut self, line: &str) -> Result<()> {
        // Single-writer discipline makes poisoning unreachable; recover
        // rather than panic if a test violates it.
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
        Ok(())
    }
}

/// In-memory [`ErrorSink`] collecting reports for inspection.
#[derive(Default)]
pub struct MemoryErrorSink {
    reports: Arc<Mutex<Vec<String>>>,
}

impl MemoryErrorSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected reports.
    pub fn buffer(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.reports)
    }
}

#[async_trait]
impl ErrorSink for MemoryErrorSink {
    async fn report(&mut self, message: &str) -> Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
        Ok(())
    }
}
