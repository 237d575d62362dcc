//! Edge manifest compiler.
//!
//! Produces the JSON manifest the edge-runtime dispatcher reads to decide
//! which function handles which path or pattern. Written fresh on every
//! build, unlike the append-only redirect file.

use crate::build::BuildError;
use crate::routes::{RouteEntry, RoutePath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Directory (relative to the project root) holding edge-function output.
pub const EDGE_FUNCTIONS_DIR: &str = ".netlify/edge-functions";

/// One function entry in the edge manifest. `path` and `pattern` are
/// mutually exclusive, mirroring the static/dynamic route duality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFunctionEntry {
    /// Name of the function handling this route.
    pub function: String,
    /// Literal path, for static routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Regex source, for dynamic routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// The edge manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeManifest {
    /// Route-to-function mappings.
    pub functions: Vec<EdgeFunctionEntry>,
    /// Manifest schema version.
    pub version: u32,
}

/// Build the manifest for the route table.
///
/// Dynamic patterns have their `\/` sequences unescaped: the route's own
/// matcher escapes path separators, but the platform's matcher expects
/// them literal. Prerendered routes are excluded, matching the redirect
/// compiler's static-asset precedence.
pub fn build_edge_manifest(routes: &[RouteEntry], entry_file: &str) -> EdgeManifest {
    let functions = routes
        .iter()
        .filter(|route| !route.is_prerendered())
        .map(|route| match &route.path {
            RoutePath::Static { pathname } => EdgeFunctionEntry {
                function: entry_file.to_string(),
                path: Some(pathname.clone()),
                pattern: None,
            },
            RoutePath::Dynamic { pattern, .. } => EdgeFunctionEntry {
                function: entry_file.to_string(),
                path: None,
                pattern: Some(pattern.replace("\\/", "/")),
            },
        })
        .collect();

    EdgeManifest {
        functions,
        version: 1,
    }
}

/// Write `manifest.json` under `<root>/.netlify/edge-functions/`,
/// creating the directory if absent and overwriting any previous
/// manifest. Returns the path written.
pub async fn write_edge_manifest(
    routes: &[RouteEntry],
    entry_file: &str,
    root: &Path,
) -> Result<PathBuf, BuildError> {
    let manifest = build_edge_manifest(routes, entry_file);

    let base_dir = root.join(EDGE_FUNCTIONS_DIR);
    fs::create_dir_all(&base_dir).await?;

    let path = base_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&path, json).await?;

    info!(path = %path.display(), functions = manifest.functions.len(), "wrote edge manifest");
    Ok(path)
}
