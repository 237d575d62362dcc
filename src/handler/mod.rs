//! Per-invocation envelope translation.
//!
//! Converts the platform's invocation envelope into a generic request,
//! dispatches it to the site application, and converts the response back
//! into the platform's response envelope. Each invocation gets its own
//! request/response pair; the only shared state is the read-only binary
//! media type set.

mod media;

pub use media::BinaryMediaTypes;

use crate::app::{RenderError, SsrApp};
use crate::build::NetlifyOptions;
use crate::envelope::{InvocationEnvelope, ResponseEnvelope};
use crate::http::{Headers, Method, RenderRequest, RenderResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use std::collections::HashMap;
use tracing::debug;

/// Header carrying the platform-resolved client IP.
const CLIENT_IP_HEADER: &str = "x-nf-client-connection-ip";

/// Translates invocation envelopes to and from the site application.
pub struct NetlifyHandler<A: SsrApp> {
    app: A,
    binary_media_types: BinaryMediaTypes,
}

impl<A: SsrApp> NetlifyHandler<A> {
    /// Create a handler with the built-in binary media type set.
    pub fn new(app: A) -> Self {
        Self {
            app,
            binary_media_types: BinaryMediaTypes::new(),
        }
    }

    /// Create a handler with extra caller-supplied binary media types.
    pub fn with_binary_media_types<I, S>(app: A, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            app,
            binary_media_types: BinaryMediaTypes::with_extra(extra),
        }
    }

    /// Create a handler from the adapter options the site configured,
    /// folding `binary_media_types` into the built-in set.
    pub fn from_options(app: A, options: &NetlifyOptions) -> Self {
        Self::with_binary_media_types(app, options.binary_media_types.iter().cloned())
    }

    /// The wrapped site application.
    pub fn app(&self) -> &A {
        &self.app
    }

    /// Handle one invocation.
    ///
    /// A URL matching no route yields the fixed 404 envelope without
    /// invoking the renderer. A renderer error propagates to the caller
    /// (the platform's invocation wrapper) and fails only that
    /// invocation.
    pub async fn handle(
        &self,
        envelope: InvocationEnvelope,
    ) -> Result<ResponseEnvelope, RenderError> {
        let request = request_from_envelope(&envelope)?;
        debug!(method = %request.method, url = %request.url, "dispatching invocation");

        let Some(route) = self.app.match_route(&request, true) else {
            debug!(url = %request.url, "no route matched");
            return Ok(ResponseEnvelope::not_found());
        };

        let response = self.app.render(request, route).await?;
        Ok(self.envelope_from_response(&response))
    }

    /// Convert a generic response into the platform's envelope.
    fn envelope_from_response(&self, response: &RenderResponse) -> ResponseEnvelope {
        let mut headers = response.headers.to_map();

        let content_type = headers.get("content-type").map(String::as_str).unwrap_or("");
        let is_base64_encoded = self.binary_media_types.is_binary(content_type);

        let body = if is_base64_encoded {
            BASE64.encode(response.body_bytes())
        } else {
            response.text_body().unwrap_or_default()
        };

        // Raw header cookies first, then cookies set through the app's
        // cookie API, in that order.
        let mut cookies: Vec<String> = response
            .headers
            .get_all("set-cookie")
            .into_iter()
            .map(str::to_string)
            .collect();
        cookies.extend(self.app.set_cookie_headers(response));

        let multi_value_headers = if cookies.is_empty() {
            None
        } else {
            headers.remove("set-cookie");
            Some(HashMap::from([("set-cookie".to_string(), cookies)]))
        };

        ResponseEnvelope {
            status_code: response.status.into(),
            headers,
            body,
            is_base64_encoded,
            multi_value_headers,
        }
    }
}

/// Convert an invocation envelope into a generic request.
fn request_from_envelope(envelope: &InvocationEnvelope) -> Result<RenderRequest, RenderError> {
    let method = Method::from(envelope.http_method.as_str());

    let headers: Headers = envelope.headers.iter().collect();
    let client_address = headers.get(CLIENT_IP_HEADER);

    let body = if method.has_request_body() {
        match &envelope.body {
            Some(raw) if envelope.is_base64_encoded => {
                let decoded = BASE64
                    .decode(raw)
                    .map_err(|e| RenderError::bad_request(format!("invalid base64 body: {e}")))?;
                Some(Bytes::from(decoded))
            }
            Some(raw) => Some(Bytes::copy_from_slice(raw.as_bytes())),
            None => None,
        }
    } else {
        None
    };

    Ok(RenderRequest {
        method,
        url: envelope.raw_url.clone(),
        headers,
        body,
        client_address,
    })
}
