//! Build-phase integration: configuration hooks and routing artifacts.
//!
//! A build runs its phases strictly in order: configure, build, finish.
//! The finish phase produces the platform's static routing artifacts
//! (redirect rules, and for the edge mode a function manifest); a failed
//! artifact write fails the build rather than deploying an incomplete
//! routing table.

pub mod bundle;
pub mod config;
pub mod manifest;
pub mod redirects;
pub mod session;

pub use bundle::{BundleSpec, EntryBundler, PROCESS_SHIM};
pub use config::{BuildSettings, NetlifyOptions, OutputMode, SiteConfig};
pub use manifest::{build_edge_manifest, write_edge_manifest, EdgeFunctionEntry, EdgeManifest};
pub use redirects::{append_redirects, render_redirects};
pub use session::{AdapterInfo, BuildSession, DeployTarget, NetlifyAdapter};

/// Error type for build-phase failures.
#[derive(Debug)]
pub enum BuildError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bundle(String),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Io(e) => write!(f, "IO error: {}", e),
            BuildError::Json(e) => write!(f, "JSON error: {}", e),
            BuildError::Bundle(msg) => write!(f, "Bundle error: {}", msg),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Io(e) => Some(e),
            BuildError::Json(e) => Some(e),
            BuildError::Bundle(_) => None,
        }
    }
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::Io(err)
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::Json(err)
    }
}
