//! Generic HTTP types exchanged with the site's router/renderer.

mod headers;
mod request;
mod response;

pub use headers::Headers;
pub use request::{Method, RenderRequest};
pub use response::{RenderResponse, StatusCode};
