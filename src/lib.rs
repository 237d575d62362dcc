//! # netlify-adapter
//!
//! Adapts an SSR build tool's output to Netlify's serverless function
//! runtime contract. The adapter does two unrelated jobs at two
//! unrelated times:
//!
//! - **Build time**: steer the build's output directories, then compile
//!   the site's resolved route table into the platform's routing
//!   artifacts (the `_redirects` rewrite file, and for edge deployments
//!   a `manifest.json` for the edge dispatcher).
//! - **Request time**: translate the platform's invocation envelope into
//!   a generic HTTP request, dispatch it to the site's router/renderer,
//!   and translate the result back into a response envelope, including
//!   binary-body and multi-valued `set-cookie` handling.
//!
//! ```text
//!  build tool ──hooks──▶ NetlifyAdapter ──▶ _redirects / manifest.json
//!
//!  platform invocation ──▶ NetlifyHandler ──▶ SsrApp (match / render)
//!      InvocationEnvelope ◀── ResponseEnvelope ◀──┘
//! ```
//!
//! The crate implements no HTTP transport and no rendering: the platform
//! owns the socket, and the site application is consumed through the
//! [`SsrApp`] trait.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use netlify_adapter::prelude::*;
//!
//! struct MySite;
//!
//! #[async_trait]
//! impl SsrApp for MySite {
//!     fn match_route(&self, request: &RenderRequest, _allow_not_found: bool) -> Option<RouteEntry> {
//!         (request.url.ends_with("/")).then(|| RouteEntry::static_route("/"))
//!     }
//!
//!     async fn render(
//!         &self,
//!         _request: RenderRequest,
//!         _route: RouteEntry,
//!     ) -> Result<RenderResponse, RenderError> {
//!         Ok(RenderResponse::html("<h1>Hello</h1>"))
//!     }
//! }
//!
//! # async fn invoke(envelope: InvocationEnvelope) -> Result<(), RenderError> {
//! let handler = NetlifyHandler::new(MySite);
//! let _response = handler.handle(envelope).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod build;
pub mod envelope;
pub mod handler;
pub mod http;
pub mod routes;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::app::{RenderError, SsrApp};
    pub use crate::build::{
        BuildError, BuildSession, DeployTarget, NetlifyAdapter, NetlifyOptions, SiteConfig,
    };
    pub use crate::envelope::{InvocationEnvelope, ResponseEnvelope};
    pub use crate::handler::NetlifyHandler;
    pub use crate::http::{Headers, Method, RenderRequest, RenderResponse, StatusCode};
    pub use crate::routes::{RouteEntry, RoutePath, Segment};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use app::{RenderError, SsrApp};
pub use build::{NetlifyAdapter, NetlifyOptions};
pub use envelope::{InvocationEnvelope, ResponseEnvelope};
pub use handler::{BinaryMediaTypes, NetlifyHandler};
pub use http::{RenderRequest, RenderResponse};
pub use routes::RouteEntry;
