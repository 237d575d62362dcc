//! Server-entry bundling inputs for the edge variant.
//!
//! Bundling itself is an external build step; this module only describes
//! the intended invocation (entry, output, banner, externals) and the
//! best-effort cleanup that follows it. The non-Node edge runtime needs a
//! process-like global, supplied as a banner prepended to the bundle.

use crate::build::BuildError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime preamble supplying a minimal process-like object for code
/// expecting a Node-like global.
pub const PROCESS_SHIM: &str = "globalThis.process = {\n\targv: [],\n\tenv: Deno.env.toObject(),\n};";

/// Default chunk file naming used when the build config does not set one.
const DEFAULT_CHUNK_FILE_NAMES: &str = "assets/chunks/chunk.[hash].mjs";

/// Description of one bundler invocation over the server entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSpec {
    /// The server entry file to bundle.
    pub entry: PathBuf,
    /// Output file; same as `entry`, overwritten in place.
    pub outfile: PathBuf,
    /// Module format of the output.
    pub format: String,
    /// Language target of the output.
    pub target: String,
    /// Modules left unresolved, provided by the platform at runtime.
    pub external: Vec<String>,
    /// Text prepended to the bundle.
    pub banner: String,
}

impl BundleSpec {
    /// The bundler invocation for an edge server entry: a single
    /// dependency-free ESM file with the process shim prepended.
    pub fn for_edge_entry(server_dir: &Path, server_entry: &str) -> Self {
        let entry = server_dir.join(server_entry);
        Self {
            outfile: entry.clone(),
            entry,
            format: "esm".to_string(),
            target: "es2020".to_string(),
            external: vec!["@astrojs/markdown-remark".to_string()],
            banner: PROCESS_SHIM.to_string(),
        }
    }
}

/// External bundler invoked over the server entry.
#[async_trait]
pub trait EntryBundler: Send + Sync {
    /// Bundle according to the spec. A failure is build-fatal.
    async fn bundle(&self, spec: &BundleSpec) -> Result<(), BuildError>;
}

/// Best-effort removal of the per-chunk output the bundler made
/// redundant. A failure here never fails the build; it is logged at
/// debug level and swallowed.
pub async fn remove_stale_chunks(server_dir: &Path, chunk_file_names: Option<&str>) {
    let chunk_path = chunk_file_names.unwrap_or(DEFAULT_CHUNK_FILE_NAMES);
    let chunk_dir = match Path::new(chunk_path).parent() {
        Some(parent) if parent != Path::new("") => server_dir.join(parent),
        _ => return,
    };

    if let Err(e) = tokio::fs::remove_dir_all(&chunk_dir).await {
        debug!(dir = %chunk_dir.display(), error = %e, "stale chunk cleanup skipped");
    }
}
