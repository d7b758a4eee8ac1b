use crate::http::{Request, Response};
use crate::middleware::{into_boxed, BoxedMiddleware, Middleware};
use http::Method;
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for route handlers
pub type BoxedHandler =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Box a handler function so it can be stored in the router
pub(crate) fn boxed<H, Fut>(handler: H) -> Arc<BoxedHandler>
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let handler: BoxedHandler = Box::new(move |req| {
        let fut: Pin<Box<dyn Future<Output = Response> + Send>> = Box::pin(handler(req));
        fut
    });
    Arc::new(handler)
}

/// A registered route: its path pattern and handler
struct Endpoint {
    pattern: String,
    handler: Arc<BoxedHandler>,
}

/// Result of matching a request against the router
pub struct RouteMatch {
    pub handler: Arc<BoxedHandler>,
    pub params: HashMap<String, String>,
    /// The pattern the route was registered with, e.g. `/todos/{id}`
    pub pattern: String,
}

/// HTTP Router with Laravel-like route registration
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Arc<Endpoint>>>,
    /// Middleware assignments: route pattern -> boxed middleware instances
    route_middleware: HashMap<String, Vec<BoxedMiddleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            route_middleware: HashMap::new(),
        }
    }

    /// Get middleware for a specific route pattern
    pub fn get_route_middleware(&self, pattern: &str) -> Vec<BoxedMiddleware> {
        self.route_middleware
            .get(pattern)
            .cloned()
            .unwrap_or_default()
    }

    /// Register middleware for a route pattern (internal use)
    pub(crate) fn add_middleware(&mut self, pattern: &str, middleware: BoxedMiddleware) {
        self.route_middleware
            .entry(pattern.to_string())
            .or_default()
            .push(middleware);
    }

    /// Insert a route with a pre-boxed handler (internal use for groups)
    pub(crate) fn insert(&mut self, method: Method, path: &str, handler: Arc<BoxedHandler>) {
        let endpoint = Arc::new(Endpoint {
            pattern: path.to_string(),
            handler,
        });
        let routes = self
            .routes
            .entry(method.clone())
            .or_insert_with(MatchitRouter::new);
        if let Err(err) = routes.insert(path, endpoint) {
            tracing::error!(%method, path, error = %err, "route registration rejected");
        }
    }

    /// Register a route for an arbitrary method
    pub fn route<H, Fut>(mut self, method: Method, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(method, path, boxed(handler));
        RouteBuilder {
            router: self,
            last_path: path.to_string(),
        }
    }

    /// Register a GET route
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::GET, path, handler)
    }

    /// Register a POST route
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::POST, path, handler)
    }

    /// Register a PUT route
    pub fn put<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::PUT, path, handler)
    }

    /// Register a PATCH route
    pub fn patch<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::PATCH, path, handler)
    }

    /// Register a DELETE route
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::DELETE, path, handler)
    }

    /// Match a request and return the handler with extracted params
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let router = self.routes.get(method)?;

        router.at(path).ok().map(|matched| {
            let params: HashMap<String, String> = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            RouteMatch {
                handler: matched.value.handler.clone(),
                params,
                pattern: matched.value.pattern.clone(),
            }
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned after registering a route, enabling `.middleware()` chaining
pub struct RouteBuilder {
    pub(crate) router: Router,
    last_path: String,
}

impl RouteBuilder {
    /// Apply middleware to the most recently registered route
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// Router::new()
    ///     .get("/admin", admin_handler).middleware(AuthMiddleware)
    ///     .get("/api/todos", todos_handler)
    /// ```
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> RouteBuilder {
        self.router
            .add_middleware(&self.last_path, into_boxed(middleware));
        self
    }

    /// Register a GET route (for chaining)
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    /// Register a POST route (for chaining)
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }

    /// Register a PUT route (for chaining)
    pub fn put<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.put(path, handler)
    }

    /// Register a PATCH route (for chaining)
    pub fn patch<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.patch(path, handler)
    }

    /// Register a DELETE route (for chaining)
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.delete(path, handler)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}
