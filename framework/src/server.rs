use crate::config::ServerConfig;
use crate::http::{collect_body, HttpResponse, Request};
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareRegistry};
use crate::routing::Router;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// HTTP server: a router, global middleware and the listener settings
///
/// # Example
///
/// ```rust,ignore
/// Server::new(routes::register(service), ServerConfig::from_env())
///     .middleware(LoggingMiddleware)
///     .run()
///     .await?;
/// ```
pub struct Server {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
    config: ServerConfig,
}

impl Server {
    pub fn new(router: impl Into<Router>, config: ServerConfig) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
            config,
        }
    }

    /// Add global middleware (runs on every matched request)
    ///
    /// For route-specific middleware, use `.middleware(M)` on the route itself.
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    pub(crate) fn with_registry(mut self, registry: MiddlewareRegistry) -> Self {
        self.middleware = registry;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip = self.config.host.parse()?;
        Ok(SocketAddr::new(ip, self.config.port))
    }

    /// Route a fully collected request through middleware and handler
    ///
    /// Unmatched paths (or methods) produce a plain-text 404.
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> HttpResponse {
        dispatch(&self.router, &self.middleware, req).await
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "server listening");

        let router = self.router;
        let middleware = Arc::new(self.middleware);
        let limit = self.config.max_body_size;

        loop {
            let (stream, peer) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = router.clone();
            let middleware = middleware.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let router = router.clone();
                    let middleware = middleware.clone();
                    async move {
                        Ok::<_, Infallible>(handle_request(&router, &middleware, req, limit).await)
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::warn!(%peer, error = %err, "error serving connection");
                }
            });
        }
    }
}

async fn handle_request(
    router: &Router,
    middleware: &MiddlewareRegistry,
    req: hyper::Request<hyper::body::Incoming>,
    limit: usize,
) -> hyper::Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();

    let bytes = match collect_body(body, limit).await {
        Ok(bytes) => bytes,
        Err(err) => return HttpResponse::from(err).into_hyper(),
    };

    dispatch(router, middleware, http::Request::from_parts(parts, bytes))
        .await
        .into_hyper()
}

async fn dispatch(
    router: &Router,
    registry: &MiddlewareRegistry,
    req: http::Request<Bytes>,
) -> HttpResponse {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let Some(matched) = router.match_route(&method, &path) else {
        return HttpResponse::text("404 Not Found").status(404);
    };

    let request = Request::new(req).with_params(matched.params);

    // Global middleware wraps route middleware
    let mut chain = MiddlewareChain::new();
    chain.extend(registry.global_middleware().iter().cloned());
    chain.extend(router.get_route_middleware(&matched.pattern));

    // Both arms carry a response
    chain
        .execute(request, matched.handler)
        .await
        .unwrap_or_else(|e| e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use crate::middleware::Next;
    use async_trait::async_trait;

    struct Tag;

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: Request, next: Next) -> Response {
            let response = next(request).await?;
            Ok(response.header("X-Tag", "seen"))
        }
    }

    async fn show(req: Request) -> Response {
        let id: i64 = req.param_as("id")?;
        HttpResponse::text(format!("todo {}", id)).ok()
    }

    fn server() -> Server {
        let router = Router::new().get("/todos/{id}", show);
        Server::new(router, ServerConfig::builder().build()).middleware(Tag)
    }

    fn get(uri: &str) -> http::Request<Bytes> {
        http::Request::builder()
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn dispatches_to_matched_handler_through_middleware() {
        let response = server().dispatch(get("/todos/7")).await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "todo 7");
        assert_eq!(response.header_value("x-tag"), Some("seen"));
    }

    #[tokio::test]
    async fn error_responses_come_back_unwrapped() {
        let response = server().dispatch(get("/todos/seven")).await;
        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = server().dispatch(get("/nope")).await;
        assert_eq!(response.status_code(), 404);

        let delete = http::Request::builder()
            .method("DELETE")
            .uri("/todos/7")
            .body(Bytes::new())
            .unwrap();
        assert_eq!(server().dispatch(delete).await.status_code(), 404);
    }
}
