//! Contract of the site application behind the adapter.
//!
//! The adapter never implements routing or rendering itself. It dispatches
//! to an [`SsrApp`]: the site's router/renderer, consumed as an opaque
//! service. A no-match is an ordinary outcome (the handler answers 404);
//! a render failure propagates to the platform's invocation wrapper.

use crate::http::{RenderRequest, RenderResponse};
use crate::routes::RouteEntry;
use async_trait::async_trait;

/// The site's router/renderer.
#[async_trait]
pub trait SsrApp: Send + Sync {
    /// Match a request against the route table. With `allow_not_found`
    /// set, the app may return its own 404 route; `None` means nothing
    /// matched at all and the renderer must not be invoked.
    fn match_route(&self, request: &RenderRequest, allow_not_found: bool) -> Option<RouteEntry>;

    /// Render the matched route into a response.
    async fn render(
        &self,
        request: RenderRequest,
        route: RouteEntry,
    ) -> Result<RenderResponse, RenderError>;

    /// Cookies set through the app's cookie API, distinct from any
    /// `set-cookie` headers already on the response object.
    fn set_cookie_headers(&self, response: &RenderResponse) -> Vec<String> {
        let _ = response;
        Vec::new()
    }
}

/// Error raised by the renderer.
#[derive(Debug, Clone)]
pub struct RenderError {
    /// Error message.
    pub message: String,
    /// HTTP-ish error code.
    pub code: u16,
}

impl RenderError {
    /// Create a new RenderError.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 500,
        }
    }

    /// Create a RenderError with a specific code.
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(400, message)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::new(err.to_string())
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::bad_request(err.to_string())
    }
}
