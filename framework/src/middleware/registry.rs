//! Registry for global middleware
//!
//! Global middleware runs on every matched request, before any route-level
//! middleware. Configure it with `Server::middleware()`.

use super::{into_boxed, BoxedMiddleware, Middleware};

/// Middleware that runs on every request, in registration order
///
/// # Example
///
/// ```rust,ignore
/// Server::new(router, config)
///     .middleware(LoggingMiddleware)
///     .run()
///     .await;
/// ```
#[derive(Default)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append global middleware; it runs after the ones already registered
    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    /// Get the list of global middleware
    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}
