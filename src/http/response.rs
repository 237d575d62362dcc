//! Generic HTTP response type produced by the site's router/renderer.

use crate::http::Headers;
use bytes::Bytes;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const MOVED_PERMANENTLY: StatusCode = StatusCode(301);
    pub const FOUND: StatusCode = StatusCode(302);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Check if the status code indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// Check if the status code indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

/// Generic HTTP response returned by the renderer.
///
/// Headers are multi-valued; a renderer appending several `set-cookie`
/// headers keeps them as distinct values, which the outbound translation
/// reads back via [`Headers::get_all`].
#[derive(Debug, Clone, Default)]
pub struct RenderResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: Headers,
    /// Response body.
    pub body: Option<Bytes>,
}

impl RenderResponse {
    /// Create a new response with the given status code.
    pub fn new(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Create an OK response.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Create an HTML response.
    pub fn html(content: impl Into<String>) -> Self {
        Self::new(StatusCode::OK)
            .header("Content-Type", "text/html")
            .body(content.into())
    }

    /// Create a text response.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(StatusCode::OK)
            .header("Content-Type", "text/plain")
            .body(content.into())
    }

    /// Create a response with a JSON body.
    pub fn json<T: serde::Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(data)?;
        Ok(Self::new(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(body))
    }

    /// Create an error response.
    pub fn error(status: impl Into<StatusCode>, message: impl Into<String>) -> Self {
        Self::new(status)
            .header("Content-Type", "text/plain")
            .body(message.into())
    }

    /// Append a header to the response.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get the body as raw bytes, empty if absent.
    pub fn body_bytes(&self) -> Bytes {
        self.body.clone().unwrap_or_default()
    }

    /// Get the body as text if present.
    pub fn text_body(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_helpers() {
        assert!(StatusCode::OK.is_success());
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(StatusCode::INTERNAL_SERVER_ERROR.is_server_error());
        assert!(!StatusCode::OK.is_client_error());
    }

    #[test]
    fn test_response_json() {
        let response = RenderResponse::json(&serde_json::json!({ "ok": true })).unwrap();
        assert!(response.status.is_success());
        assert_eq!(
            response.headers.get("content-type"),
            Some("application/json".to_string())
        );
    }

    #[test]
    fn test_response_multiple_cookies_stay_distinct() {
        let response = RenderResponse::html("<p>hi</p>")
            .header("Set-Cookie", "a=1")
            .header("Set-Cookie", "b=2");
        assert_eq!(response.headers.get_all("set-cookie"), vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_response_error() {
        let response = RenderResponse::error(StatusCode::NOT_FOUND, "Not found");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.text_body(), Some("Not found".to_string()));
    }
}
