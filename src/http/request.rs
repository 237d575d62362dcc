//! Generic HTTP request type handed to the site's router/renderer.

use crate::http::Headers;
use bytes::Bytes;

/// HTTP method enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// Whether a request with this method carries a body. GET and HEAD
    /// requests never do; the invocation envelope's body field is ignored
    /// for them.
    pub fn has_request_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Head)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
        }
    }
}

impl From<&str> for Method {
    fn from(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            _ => Method::Get,
        }
    }
}

/// Generic HTTP request dispatched to the renderer.
///
/// Built from an [`InvocationEnvelope`](crate::envelope::InvocationEnvelope)
/// by the handler. The caller's address travels in the dedicated
/// `client_address` field rather than a header, so the renderer can read
/// it without trusting the spoofable header set.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// HTTP method.
    pub method: Method,
    /// Full request URL.
    pub url: String,
    /// Request headers.
    pub headers: Headers,
    /// Raw request body, already decoded from the envelope's encoding.
    pub body: Option<Bytes>,
    /// Verified client IP, resolved by the platform.
    pub client_address: Option<String>,
}

impl RenderRequest {
    /// Create a new request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            client_address: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the client address.
    pub fn client_address(mut self, address: impl Into<String>) -> Self {
        self.client_address = Some(address.into());
        self
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Parse the body as JSON if present.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.body.as_ref().map(|b| serde_json::from_slice(b))
    }
}
