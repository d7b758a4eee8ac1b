use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;

/// HTTP Response builder providing Laravel-like response creation
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

/// Response type alias - allows using `?` operator for early returns
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// Create a response with a string body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        }
    }

    /// Create a JSON response from a serde_json::Value
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// Create a JSON response from any serializable value
    pub fn serialized<T: Serialize>(value: &T) -> Result<Self, FrameworkError> {
        let body = serde_json::to_string(value)
            .map_err(|e| FrameworkError::internal(format!("Failed to serialize response: {}", e)))?;
        Ok(Self {
            status: 200,
            body,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        })
    }

    /// Set the HTTP status code
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header to the response
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Wrap this response in Ok() for use as Response type
    pub fn ok(self) -> Response {
        Ok(self)
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// First header value with the given name (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Convert to hyper response
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "invalid response parts");
                let mut fallback = hyper::Response::new(Full::new(Bytes::new()));
                *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Auto-convert FrameworkError to HttpResponse
///
/// This enables using the `?` operator in controller handlers to propagate
/// framework errors as appropriate HTTP responses.
impl From<FrameworkError> for HttpResponse {
    fn from(err: FrameworkError) -> HttpResponse {
        let status = err.status_code();
        let body = match &err {
            FrameworkError::Validation(errors) => errors.to_json(),
            _ => serde_json::json!({ "error": err.to_string() }),
        };
        HttpResponse::json(body).status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrors;

    #[test]
    fn framework_errors_render_as_json() {
        let response = HttpResponse::from(FrameworkError::param_parse("abc", "i64"));
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.header_value("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["error"], "Invalid parameter 'abc': expected i64");
    }

    #[test]
    fn validation_errors_keep_the_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "The title field is required.");
        let response = HttpResponse::from(FrameworkError::Validation(errors));

        assert_eq!(response.status_code(), 422);
        let body: serde_json::Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["errors"]["title"][0], "The title field is required.");
    }

    #[test]
    fn serialized_sets_json_content_type() {
        let response = HttpResponse::serialized(&vec![1, 2, 3]).unwrap().status(201);
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.body(), "[1,2,3]");
        assert_eq!(response.into_hyper().status(), 201);
    }
}
