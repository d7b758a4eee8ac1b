use std::time::Instant;
use web::{async_trait, Middleware, Next, Request, Response};

/// Logs method, path, status and latency of every request
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let method = request.method().clone();
        let path = request.path().to_string();
        let started = Instant::now();

        let response = next(request).await;

        let status = match &response {
            Ok(res) | Err(res) => res.status_code(),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status >= 500 {
            tracing::error!(%method, %path, status, elapsed_ms, "request failed");
        } else {
            tracing::info!(%method, %path, status, elapsed_ms, "request");
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use web::{HttpResponse, Router, Server, ServerConfig};

    async fn ok(_req: Request) -> Response {
        HttpResponse::text("fine").status(201).ok()
    }

    async fn broken(_req: Request) -> Response {
        Err(HttpResponse::text("broken").status(500))
    }

    fn get(uri: &str) -> http::Request<Bytes> {
        http::Request::builder()
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn passes_responses_through_untouched() {
        let router = Router::new().get("/ok", ok).get("/fail", broken);
        let server =
            Server::new(router, ServerConfig::builder().build()).middleware(LoggingMiddleware);

        let res = server.dispatch(get("/ok")).await;
        assert_eq!(res.status_code(), 201);
        assert_eq!(res.body(), "fine");

        let res = server.dispatch(get("/fail")).await;
        assert_eq!(res.status_code(), 500);
        assert_eq!(res.body(), "broken");
    }
}
