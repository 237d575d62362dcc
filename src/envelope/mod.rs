//! Invocation and response envelopes exchanged with the platform.
//!
//! Field names are fixed by the platform's function-invocation mechanism
//! and must match exactly (`httpMethod`, `rawUrl`, `isBase64Encoded`,
//! `multiValueHeaders`, ...).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One incoming HTTP request, as delivered by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEnvelope {
    /// HTTP method string (e.g. "GET").
    pub http_method: String,
    /// Single-valued request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Full request URL.
    pub raw_url: String,
    /// Request body. Meaningful only for non-GET/HEAD methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether `body` is base64-encoded rather than UTF-8 text.
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// One outgoing HTTP response, in the platform's envelope format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Single-valued response headers. A header with multiple values
    /// (currently only `set-cookie`) lives in `multi_value_headers` and
    /// never appears here.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response body, base64-encoded when `is_base64_encoded` is set.
    pub body: String,
    /// Whether `body` is base64-encoded.
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Multi-valued headers. Omitted entirely when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<HashMap<String, Vec<String>>>,
}

impl ResponseEnvelope {
    /// The fixed response for a URL that matches no configured route.
    /// Not an error: the renderer is never invoked for it.
    pub fn not_found() -> Self {
        Self {
            status_code: 404,
            headers: HashMap::new(),
            body: "Not found".to_string(),
            is_base64_encoded: false,
            multi_value_headers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_field_names() {
        let json = r#"{
            "httpMethod": "POST",
            "headers": { "content-type": "text/plain" },
            "rawUrl": "https://example.netlify.app/submit",
            "body": "hello",
            "isBase64Encoded": false
        }"#;

        let envelope: InvocationEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.http_method, "POST");
        assert_eq!(envelope.raw_url, "https://example.netlify.app/submit");
        assert_eq!(envelope.body.as_deref(), Some("hello"));
        assert!(!envelope.is_base64_encoded);
    }

    #[test]
    fn test_invocation_optional_fields_default() {
        let json = r#"{ "httpMethod": "GET", "rawUrl": "https://example.netlify.app/" }"#;
        let envelope: InvocationEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.headers.is_empty());
        assert!(envelope.body.is_none());
        assert!(!envelope.is_base64_encoded);
    }

    #[test]
    fn test_response_serializes_platform_names() {
        let envelope = ResponseEnvelope {
            status_code: 200,
            headers: HashMap::from([("content-type".to_string(), "text/html".to_string())]),
            body: "<p>hi</p>".to_string(),
            is_base64_encoded: false,
            multi_value_headers: Some(HashMap::from([(
                "set-cookie".to_string(),
                vec!["a=1".to_string(), "b=2".to_string()],
            )])),
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["isBase64Encoded"], false);
        assert_eq!(json["multiValueHeaders"]["set-cookie"][1], "b=2");
    }

    #[test]
    fn test_response_omits_empty_multi_value_headers() {
        let envelope = ResponseEnvelope::not_found();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["body"], "Not found");
        assert!(json.get("multiValueHeaders").is_none());
    }
}
