//! Binary media type detection for outbound body encoding.

use std::collections::HashSet;

/// Media types whose response bodies are base64-encoded in the envelope.
const KNOWN_BINARY_MEDIA_TYPES: &[&str] = &[
    "audio/3gpp",
    "audio/3gpp2",
    "audio/aac",
    "audio/midi",
    "audio/mpeg",
    "audio/ogg",
    "audio/opus",
    "audio/wav",
    "audio/webm",
    "audio/x-midi",
    "image/avif",
    "image/bmp",
    "image/gif",
    "image/vnd.microsoft.icon",
    "image/heif",
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "image/tiff",
    "image/webp",
    "video/3gpp",
    "video/3gpp2",
    "video/mp2t",
    "video/mp4",
    "video/mpeg",
    "video/ogg",
    "video/x-msvideo",
    "video/webm",
];

/// The set of MIME types treated as binary.
///
/// Decides only the encoding of the outbound body; inbound encoding is
/// dictated by the envelope's own `isBase64Encoded` flag.
#[derive(Debug, Clone)]
pub struct BinaryMediaTypes {
    types: HashSet<String>,
}

impl BinaryMediaTypes {
    /// The built-in set.
    pub fn new() -> Self {
        Self::with_extra(std::iter::empty::<String>())
    }

    /// The built-in set extended with caller-supplied media types.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types = KNOWN_BINARY_MEDIA_TYPES
            .iter()
            .map(|t| t.to_string())
            .chain(extra.into_iter().map(|t| t.into().to_ascii_lowercase()))
            .collect();
        Self { types }
    }

    /// Whether a `content-type` header value denotes a binary body.
    /// Parameters after the first `;` are ignored.
    pub fn is_binary(&self, content_type: &str) -> bool {
        self.types.contains(&essence(content_type))
    }
}

impl Default for BinaryMediaTypes {
    fn default() -> Self {
        Self::new()
    }
}

/// The media type of a `content-type` header value: the portion before
/// the first `;`, trimmed and lowercased.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
