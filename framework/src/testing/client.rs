use crate::http::HttpResponse;
use crate::Server;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Drives a `Server` in-process, without binding a socket
///
/// ```rust,ignore
/// let client = TestClient::new(server);
/// let res = client.post("/api/v1/todos/create", &json!({"title": "Buy milk"})).await;
/// expect!(res.status).to_equal(201);
/// ```
pub struct TestClient {
    server: Server,
}

/// Status and decoded body of a dispatched request
///
/// `body` is `Value::Null` when the response was not JSON.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    fn from_response(response: HttpResponse) -> Self {
        let text = response.body().to_string();
        Self {
            status: response.status_code(),
            body: serde_json::from_str(&text).unwrap_or(Value::Null),
            text,
        }
    }
}

impl TestClient {
    pub fn new(server: Server) -> Self {
        Self { server }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None, Bytes::new()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, None, Bytes::new()).await
    }

    pub async fn post<T: Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.json("POST", uri, body).await
    }

    pub async fn put<T: Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.json("PUT", uri, body).await
    }

    pub async fn patch<T: Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.json("PATCH", uri, body).await
    }

    /// Send a body verbatim with the given content type
    pub async fn raw(&self, method: &str, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send(method, uri, Some(content_type), Bytes::from(body.to_string()))
            .await
    }

    async fn json<T: Serialize>(&self, method: &str, uri: &str, body: &T) -> TestResponse {
        let bytes = serde_json::to_vec(body).unwrap_or_default();
        self.send(method, uri, Some("application/json"), Bytes::from(bytes))
            .await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> TestResponse {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = match builder.body(body) {
            Ok(request) => request,
            Err(e) => panic!("invalid test request {} {}: {}", method, uri, e),
        };
        TestResponse::from_response(self.server.dispatch(request).await)
    }
}
