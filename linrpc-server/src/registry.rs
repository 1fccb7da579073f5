//! Handler registry: the dispatch table for method names
//!
//! The registry maps method names to handlers. It is built once before
//! the request loop starts and is read-only for the rest of the process
//! lifetime; the loop owns it exclusively. That immutability is the only
//! reason the responder has no shared-mutable-state story at all.
//!
//! # Examples
//!
//! ```rust
//! use linrpc_server::{from_fn, HandlerRegistry};
//!
//! let registry = HandlerRegistry::builder()
//!     .handler("ping", from_fn(|_| async { Ok(serde_json::json!("pong")) }))
//!     .build();
//! assert!(registry.has_method("ping"));
//! ```

use crate::handler::Handler;
use linrpc_core::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable mapping from method name to handler.
///
/// Lookup is O(1) via `HashMap`; handlers sit behind `Arc` so dispatch
/// can hold one past the lookup without borrowing the registry.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Arc<HashMap<String, Arc<dyn Handler>>>,
}

impl HandlerRegistry {
    /// Create an empty registry. A loop over an empty registry answers
    /// every request with method-not-found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up the handler for a method.
    pub fn get(&self, method: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(method).cloned()
    }

    /// True if a handler is registered under this name.
    pub fn has_method(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Names of all registered methods, for startup logging.
    pub fn methods(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Resolve `method` and invoke its handler with `params`.
    ///
    /// # Errors
    ///
    /// [`Error::MethodNotFound`] if no handler is registered under
    /// `method`; otherwise whatever the handler returns.
    pub async fn dispatch(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let handler = self
            .get(method)
            .ok_or_else(|| Error::MethodNotFound(method.to_string()))?;
        handler.handle(params).await
    }
}

/// Builder collecting handlers before freezing them into a registry.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a method name. Registering the same name
    /// twice keeps the later handler.
    pub fn handler(mut self, method: impl Into<String>, handler: Box<dyn Handler>) -> Self {
        self.handlers.insert(method.into(), Arc::from(handler));
        self
    }

    /// Freeze the collected handlers into an immutable registry.
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: Arc::new(self.handlers),
        }
    }
}
