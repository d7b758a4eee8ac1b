//! Middleware support
//!
//! A middleware receives the request and a `Next` continuation. It can
//! inspect or short-circuit the request, and it sees the response on the way out.
//!
//! ```rust,ignore
//! pub struct TimingMiddleware;
//!
//! #[async_trait]
//! impl Middleware for TimingMiddleware {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         let started = std::time::Instant::now();
//!         let response = next(request).await;
//!         tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64);
//!         response
//!     }
//! }
//! ```

mod registry;

pub use registry::MiddlewareRegistry;

use crate::http::{Request, Response};
use crate::routing::BoxedHandler;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Continuation passed to a middleware; calling it runs the rest of the chain
pub type Next =
    Arc<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// Ordered list of middleware wrapped around a single handler
#[derive(Default)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    /// Run the chain; the first middleware added is the outermost
    pub async fn execute(self, request: Request, handler: Arc<BoxedHandler>) -> Response {
        let mut next: Next = Arc::new(move |req| (handler.as_ref())(req));

        for middleware in self.middleware.into_iter().rev() {
            let inner = next;
            next = Arc::new(move |req| {
                let middleware = middleware.clone();
                let inner = inner.clone();
                let fut: Pin<Box<dyn Future<Output = Response> + Send>> =
                    Box::pin(async move { middleware.handle(req, inner).await });
                fut
            });
        }

        next(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use bytes::Bytes;

    struct Tag(&'static str);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: Request, next: Next) -> Response {
            let response = next(request).await?;
            let seen = response.header_value("x-trail").unwrap_or("").to_string();
            Ok(HttpResponse::text(response.body().to_string())
                .header("x-trail", format!("{}{}", seen, self.0)))
        }
    }

    struct Deny;

    #[async_trait]
    impl Middleware for Deny {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            Err(HttpResponse::text("denied").status(403))
        }
    }

    fn handler() -> Arc<BoxedHandler> {
        let handler: BoxedHandler = Box::new(|_req: Request| {
            let fut: Pin<Box<dyn Future<Output = Response> + Send>> =
                Box::pin(async { Ok(HttpResponse::text("handled")) });
            fut
        });
        Arc::new(handler)
    }

    fn request() -> Request {
        Request::new(http::Request::new(Bytes::new()))
    }

    #[tokio::test]
    async fn outermost_middleware_sees_the_response_last() {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(Tag("a")), into_boxed(Tag("b"))]);

        let response = chain.execute(request(), handler()).await.unwrap();
        assert_eq!(response.body(), "handled");
        assert_eq!(response.header_value("x-trail"), Some("ba"));
    }

    #[tokio::test]
    async fn middleware_can_short_circuit() {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(Deny), into_boxed(Tag("never"))]);

        let response = chain.execute(request(), handler()).await.unwrap_err();
        assert_eq!(response.status_code(), 403);
        assert_eq!(response.body(), "denied");
    }
}
