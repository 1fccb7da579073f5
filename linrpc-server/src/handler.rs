//! Handler trait and adapters for JSON-RPC methods
//!
//! A handler is a pure function of the request's `params` that produces a
//! JSON-serializable result or fails with a reportable error. Handlers
//! carry no per-request state; everything they need arrives in `params`.
//!
//! # Creating handlers
//!
//! - [`from_fn`] wraps an async closure working with raw `serde_json::Value`
//! - [`from_typed_fn`] wraps an async closure with typed parameters,
//!   deserialized automatically and rejected as invalid-params on mismatch
//!
//! # Why boxed futures?
//!
//! Different handlers have different concrete future types, and the
//! registry needs one uniform type to store. `HandlerFuture` boxes and
//! pins the future; the cost is negligible next to a read from stdin.
//!
//! # Examples
//!
//! ```rust
//! use linrpc_server::{from_fn, from_typed_fn};
//! use serde::Deserialize;
//!
//! let echo = from_fn(|params| async move {
//!     Ok(params.unwrap_or(serde_json::Value::Null))
//! });
//!
//! #[derive(Deserialize)]
//! struct GreetParams {
//!     name: String,
//! }
//!
//! let greet = from_typed_fn(|p: GreetParams| async move {
//!     Ok(format!("Hello, {}!", p.name))
//! });
//! ```

use linrpc_core::{Error, Result};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// The future a handler returns: boxed and pinned so every handler has
/// the same type, `Send` so it can run on the tokio runtime.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// A method implementation bound to a name in the registry.
///
/// Implementations must be `Send + Sync` because the registry shares
/// them behind `Arc`. Handlers should be stateless; the registry is
/// immutable after construction and the loop invokes one handler at a
/// time, so there is nothing to synchronize.
///
/// You rarely implement this directly; use [`from_fn`] or
/// [`from_typed_fn`] instead.
pub trait Handler: Send + Sync {
    /// Invoke the handler with the request's `params`.
    ///
    /// `params` is `None` when the request omitted the field; typed
    /// handlers see that as an empty mapping, so parameter structs with
    /// defaulted fields work for bare requests.
    ///
    /// Errors are mapped to JSON-RPC error responses by the loop:
    /// [`Error::InvalidParams`] becomes `-32602`, anything else `-32603`.
    fn handle(&self, params: Option<Value>) -> HandlerFuture;
}

/// Adapter that lets a plain async function act as a [`Handler`].
///
/// Exists because the orphan rule prevents implementing `Handler` for
/// arbitrary closures directly; this wrapper is a type we own.
pub struct FnHandler<F, Fut>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    func: F,
}

impl<F, Fut> Handler for FnHandler<F, Fut>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn handle(&self, params: Option<Value>) -> HandlerFuture {
        Box::pin((self.func)(params))
    }
}

/// Wrap an async function over raw JSON params into a boxed [`Handler`].
///
/// The function receives `Option<Value>` exactly as decoded and must
/// return a JSON value. Use [`from_typed_fn`] when you want serde to do
/// the parameter plumbing.
pub fn from_fn<F, Fut>(func: F) -> Box<dyn Handler>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Box::new(FnHandler { func })
}

/// Wrap an async function with typed parameters into a boxed [`Handler`].
///
/// Deserializes `params` into `P` before calling the function and
/// serializes the returned `R` back to JSON afterwards. Absent `params`
/// deserializes from an empty JSON object, so a parameter struct whose
/// fields all carry `#[serde(default)]` accepts a bare request.
///
/// # Error mapping
///
/// - `params` does not deserialize to `P`: [`Error::InvalidParams`]
/// - result does not serialize: [`Error::Serialization`]
/// - errors from the function itself pass through unchanged
///
/// # Examples
///
/// ```rust
/// use linrpc_server::from_typed_fn;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct PathParams {
///     #[serde(default)]
///     path: String,
/// }
///
/// let handler = from_typed_fn(|p: PathParams| async move {
///     Ok(format!("Successfully processed path: {}", p.path))
/// });
/// ```
pub fn from_typed_fn<P, R, F, Fut>(func: F) -> Box<dyn Handler>
where
    P: serde::de::DeserializeOwned + Send + 'static,
    R: serde::Serialize + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    use std::sync::Arc;
    // The closure is shared across invocations; Arc gives the async
    // block an owned clone without requiring F: Clone.
    let func = Arc::new(func);

    from_fn(move |params: Option<Value>| {
        let func = Arc::clone(&func);
        async move {
            // Absent params means "no arguments", which for a typed
            // handler is the empty mapping.
            let raw = params.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            let params: P =
                serde_json::from_value(raw).map_err(|e| Error::InvalidParams(e.to_string()))?;

            let result = func(params).await?;

            serde_json::to_value(result).map_err(|e| Error::Serialization(e.to_string()))
        }
    })
}
