//! Route grouping with shared prefix and middleware

use super::router::{boxed, BoxedHandler, Router};
use crate::http::{Request, Response};
use crate::middleware::{into_boxed, BoxedMiddleware, Middleware};
use http::Method;
use std::future::Future;
use std::sync::Arc;

/// Builder for route groups with shared prefix and middleware
///
/// # Example
///
/// ```rust,ignore
/// Router::new()
///     .group("/api/v1/todos", |r| {
///         r.get("/all", list)
///          .post("/create", create)
///     })
///     .middleware(LoggingMiddleware)
/// ```
pub struct GroupBuilder {
    /// The outer router we're building into
    outer_router: Router,
    /// Routes registered within this group (paths relative to the prefix)
    group_routes: Vec<GroupRoute>,
    prefix: String,
    /// Middleware to apply to all routes in this group
    middleware: Vec<BoxedMiddleware>,
}

/// A route registered within a group
struct GroupRoute {
    method: Method,
    path: String,
    handler: Arc<BoxedHandler>,
}

impl GroupBuilder {
    /// Apply middleware to all routes in this group
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(into_boxed(middleware));
        self
    }

    /// Finalize the group and merge routes into the outer router
    fn finalize(mut self) -> Router {
        for route in self.group_routes {
            let full_path = format!("{}{}", self.prefix, route.path);
            self.outer_router
                .insert(route.method, &full_path, route.handler);

            for mw in &self.middleware {
                self.outer_router.add_middleware(&full_path, mw.clone());
            }
        }

        self.outer_router
    }
}

/// Inner router used within a group closure
///
/// Captures routes without the prefix; they are merged with it on finalize.
pub struct GroupRouter {
    routes: Vec<GroupRoute>,
}

impl GroupRouter {
    fn new() -> Self {
        Self { routes: Vec::new() }
    }

    fn push<H, Fut>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(GroupRoute {
            method,
            path: path.to_string(),
            handler: boxed(handler),
        });
        self
    }

    /// Register a GET route within the group
    pub fn get<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.push(Method::GET, path, handler)
    }

    /// Register a POST route within the group
    pub fn post<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.push(Method::POST, path, handler)
    }

    /// Register a PUT route within the group
    pub fn put<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.push(Method::PUT, path, handler)
    }

    /// Register a PATCH route within the group
    pub fn patch<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.push(Method::PATCH, path, handler)
    }

    /// Register a DELETE route within the group
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.push(Method::DELETE, path, handler)
    }
}

impl Router {
    /// Create a route group with a shared prefix
    ///
    /// Routes defined within the group have the prefix prepended to their paths.
    /// Middleware applied to the group is applied to every route within it.
    pub fn group<F>(self, prefix: &str, builder_fn: F) -> GroupBuilder
    where
        F: FnOnce(GroupRouter) -> GroupRouter,
    {
        let built = builder_fn(GroupRouter::new());

        GroupBuilder {
            outer_router: self,
            group_routes: built.routes,
            prefix: prefix.trim_end_matches('/').to_string(),
            middleware: Vec::new(),
        }
    }
}

impl From<GroupBuilder> for Router {
    fn from(builder: GroupBuilder) -> Self {
        builder.finalize()
    }
}
