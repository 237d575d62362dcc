//! Adapter identity and build lifecycle hooks.
//!
//! The adapter reacts to four lifecycle callbacks from the build tool:
//! configuration setup, configuration done, build start, and build done.
//! State spanning the phases lives in an explicit [`BuildSession`]
//! constructed at setup and threaded through every later hook, never in
//! captured variables.

use crate::build::bundle::{remove_stale_chunks, BundleSpec, EntryBundler};
use crate::build::config::{BuildSettings, NetlifyOptions, OutputMode, SiteConfig};
use crate::build::manifest::{write_edge_manifest, EDGE_FUNCTIONS_DIR};
use crate::build::redirects::append_redirects;
use crate::build::BuildError;
use crate::routes::RouteEntry;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Deployment mode, doubling as the namespace tag under `/.netlify/` in
/// rewrite-rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployTarget {
    /// Standard serverless functions (Node runtime, unbundled entry).
    Functions,
    /// On-demand builders (Node runtime, unbundled entry).
    Builders,
    /// Edge functions (non-Node runtime, bundled entry with shim).
    EdgeFunctions,
}

impl DeployTarget {
    /// Namespace tag used in rewrite-rule targets and adapter names.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployTarget::Functions => "functions",
            DeployTarget::Builders => "builders",
            DeployTarget::EdgeFunctions => "edge-functions",
        }
    }
}

impl std::fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The adapter's identity, registered with the build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    /// Adapter name.
    pub name: String,
    /// Module the platform loads as the function body.
    pub server_entrypoint: String,
    /// Exported symbols the platform invokes.
    pub exports: Vec<String>,
}

/// Per-build state spanning the lifecycle hooks.
#[derive(Debug, Clone)]
pub struct BuildSession {
    /// Deployment mode for this build.
    pub target: DeployTarget,
    /// Project root.
    pub root: PathBuf,
    /// Client output directory.
    pub out_dir: PathBuf,
    /// Server output directory.
    pub server_dir: PathBuf,
    /// Server entry file name, extension included (e.g. "entry.mjs").
    pub server_entry: String,
    /// Server entry routing token, extension stripped (e.g. "entry").
    pub entry_file: String,
    /// Whether the build config still needs the client/server fixup at
    /// build start (the config had no client dir at setup time).
    pub needs_build_config: bool,
    /// Bundler chunk naming, captured at build start.
    pub chunk_file_names: Option<String>,
}

/// The adapter: declares identity and mutates build configuration so
/// artifacts land where the platform expects them.
pub struct NetlifyAdapter {
    target: DeployTarget,
    options: NetlifyOptions,
    bundler: Option<Box<dyn EntryBundler>>,
}

impl NetlifyAdapter {
    /// Adapter for the serverless-function deployment mode.
    pub fn functions(options: NetlifyOptions) -> Self {
        Self::new(DeployTarget::Functions, options)
    }

    /// Adapter for the on-demand builder deployment mode.
    pub fn builders(options: NetlifyOptions) -> Self {
        Self::new(DeployTarget::Builders, options)
    }

    /// Adapter for the edge deployment mode.
    pub fn edge_functions(options: NetlifyOptions) -> Self {
        Self::new(DeployTarget::EdgeFunctions, options)
    }

    fn new(target: DeployTarget, options: NetlifyOptions) -> Self {
        Self {
            target,
            options,
            bundler: None,
        }
    }

    /// Attach the external bundler invoked over the edge server entry.
    pub fn with_bundler(mut self, bundler: Box<dyn EntryBundler>) -> Self {
        self.bundler = Some(bundler);
        self
    }

    /// The adapter options.
    pub fn options(&self) -> &NetlifyOptions {
        &self.options
    }

    /// Configuration-setup hook: point the build output at the
    /// platform's expected directories and open the build session.
    pub fn config_setup(&self, config: &mut SiteConfig) -> BuildSession {
        let needs_build_config = config.build.client.is_none();

        let out_dir = self
            .options
            .dist
            .clone()
            .unwrap_or_else(|| config.root.join("dist"));

        let server_dir = match self.target {
            DeployTarget::Functions => config.root.join(".netlify/functions-internal"),
            DeployTarget::Builders => config.root.join("functions"),
            DeployTarget::EdgeFunctions => config.root.join(EDGE_FUNCTIONS_DIR),
        };

        config.out_dir = out_dir.clone();
        config.build.client = Some(out_dir.clone());
        config.build.server = Some(server_dir.clone());
        if self.target == DeployTarget::EdgeFunctions {
            // The edge bundle is always emitted under a fixed name.
            config.build.server_entry = "entry.js".to_string();
        }

        BuildSession {
            target: self.target,
            root: config.root.clone(),
            out_dir,
            server_dir,
            server_entry: config.build.server_entry.clone(),
            entry_file: entry_token(&config.build.server_entry),
            needs_build_config,
            chunk_file_names: None,
        }
    }

    /// Configuration-done hook: capture the final entry file name and
    /// register the adapter's identity. Warns (without failing) when the
    /// project is fully static and the adapter has nothing to host.
    pub fn config_done(&self, session: &mut BuildSession, config: &SiteConfig) -> AdapterInfo {
        session.server_entry = config.build.server_entry.clone();
        session.entry_file = entry_token(&config.build.server_entry);

        if config.output == OutputMode::Static {
            warn!("`output: \"server\"` is required to use this adapter.");
            warn!("Otherwise, this adapter is not required to deploy a static site to Netlify.");
        }

        self.adapter_info()
    }

    /// Build-start hook: late-binding fixup for build-config fields not
    /// finalized during configuration.
    pub fn build_start(&self, session: &mut BuildSession, build: &mut BuildSettings) {
        if session.needs_build_config {
            build.client = Some(session.out_dir.clone());
            build.server = Some(session.server_dir.clone());
            session.server_entry = build.server_entry.clone();
            session.entry_file = entry_token(&build.server_entry);
        }
        session.chunk_file_names = build.chunk_file_names.clone();
    }

    /// Build-done hook: produce the static routing artifacts. For the
    /// edge mode this first bundles the server entry (external step) and
    /// writes the edge manifest; every mode appends the redirect rules.
    /// Both artifacts must land before the build reports success.
    pub async fn build_done(
        &self,
        session: &BuildSession,
        routes: &[RouteEntry],
        dir: &Path,
    ) -> Result<(), BuildError> {
        if session.target == DeployTarget::EdgeFunctions {
            if let Some(bundler) = &self.bundler {
                let spec = BundleSpec::for_edge_entry(&session.server_dir, &session.server_entry);
                bundler.bundle(&spec).await?;
                remove_stale_chunks(&session.server_dir, session.chunk_file_names.as_deref())
                    .await;
            }
            write_edge_manifest(routes, &session.entry_file, &session.root).await?;
        }

        append_redirects(routes, dir, &session.entry_file, session.target).await
    }

    fn adapter_info(&self) -> AdapterInfo {
        let (entrypoint, exports) = match self.target {
            DeployTarget::Functions => ("netlify-adapter/netlify-functions.js", "handler"),
            DeployTarget::Builders => ("netlify-adapter/netlify-builders.js", "handler"),
            DeployTarget::EdgeFunctions => {
                ("netlify-adapter/netlify-edge-functions.js", "default")
            }
        };
        AdapterInfo {
            name: format!("netlify-adapter/{}", self.target),
            server_entrypoint: entrypoint.to_string(),
            exports: vec![exports.to_string()],
        }
    }
}

/// The routing token of a server entry file: its name with a trailing
/// `.mjs` or `.js` extension stripped.
fn entry_token(server_entry: &str) -> String {
    server_entry
        .strip_suffix(".mjs")
        .or_else(|| server_entry.strip_suffix(".js"))
        .unwrap_or(server_entry)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_token_strips_extension() {
        assert_eq!(entry_token("entry.mjs"), "entry");
        assert_eq!(entry_token("entry.js"), "entry");
        assert_eq!(entry_token("entry"), "entry");
    }

    #[test]
    fn test_config_setup_functions_dirs() {
        let adapter = NetlifyAdapter::functions(NetlifyOptions::new());
        let mut config = SiteConfig::new("/srv/site");
        let session = adapter.config_setup(&mut config);

        assert_eq!(config.out_dir, PathBuf::from("/srv/site/dist"));
        assert_eq!(config.build.client, Some(PathBuf::from("/srv/site/dist")));
        assert_eq!(
            config.build.server,
            Some(PathBuf::from("/srv/site/.netlify/functions-internal"))
        );
        assert!(session.needs_build_config);
        assert_eq!(session.entry_file, "entry");
    }

    #[test]
    fn test_config_setup_honors_dist_override() {
        let adapter = NetlifyAdapter::builders(NetlifyOptions::new().dist("/srv/site/public"));
        let mut config = SiteConfig::new("/srv/site");
        let session = adapter.config_setup(&mut config);

        assert_eq!(session.out_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(config.build.server, Some(PathBuf::from("/srv/site/functions")));
    }

    #[test]
    fn test_config_setup_edge_fixes_entry_name() {
        let adapter = NetlifyAdapter::edge_functions(NetlifyOptions::new());
        let mut config = SiteConfig::new("/srv/site");
        let session = adapter.config_setup(&mut config);

        assert_eq!(config.build.server_entry, "entry.js");
        assert_eq!(session.server_entry, "entry.js");
        assert_eq!(session.entry_file, "entry");
        assert_eq!(
            session.server_dir,
            PathBuf::from("/srv/site/.netlify/edge-functions")
        );
    }

    #[test]
    fn test_config_done_identity_per_target() {
        let mut config = SiteConfig::new("/srv/site");

        let adapter = NetlifyAdapter::functions(NetlifyOptions::new());
        let mut session = adapter.config_setup(&mut config);
        let info = adapter.config_done(&mut session, &config);
        assert_eq!(info.name, "netlify-adapter/functions");
        assert_eq!(info.exports, vec!["handler"]);

        let adapter = NetlifyAdapter::edge_functions(NetlifyOptions::new());
        let mut session = adapter.config_setup(&mut config);
        let info = adapter.config_done(&mut session, &config);
        assert_eq!(info.name, "netlify-adapter/edge-functions");
        assert_eq!(info.exports, vec!["default"]);
    }

    #[test]
    fn test_config_done_static_output_is_nonfatal() {
        let adapter = NetlifyAdapter::functions(NetlifyOptions::new());
        let mut config = SiteConfig::new("/srv/site").output(OutputMode::Static);
        let mut session = adapter.config_setup(&mut config);
        // Warns, but still returns a usable identity.
        let info = adapter.config_done(&mut session, &config);
        assert_eq!(info.name, "netlify-adapter/functions");
    }

    #[test]
    fn test_build_start_late_fixup() {
        let adapter = NetlifyAdapter::functions(NetlifyOptions::new());
        let mut config = SiteConfig::new("/srv/site");
        let mut session = adapter.config_setup(&mut config);
        session.needs_build_config = true;

        let mut build = BuildSettings {
            client: None,
            server: None,
            server_entry: "renamed.mjs".to_string(),
            chunk_file_names: Some("assets/chunks/c.[hash].mjs".to_string()),
        };
        adapter.build_start(&mut session, &mut build);

        assert_eq!(build.client, Some(session.out_dir.clone()));
        assert_eq!(build.server, Some(session.server_dir.clone()));
        assert_eq!(session.entry_file, "renamed");
        assert_eq!(
            session.chunk_file_names.as_deref(),
            Some("assets/chunks/c.[hash].mjs")
        );
    }

    #[test]
    fn test_build_start_without_fixup_keeps_entry() {
        let adapter = NetlifyAdapter::functions(NetlifyOptions::new());
        let mut config = SiteConfig::new("/srv/site");
        config.build.client = Some(config.root.join("dist"));
        let mut session = adapter.config_setup(&mut config);
        assert!(!session.needs_build_config);

        let mut build = config.build.clone();
        build.server_entry = "other.mjs".to_string();
        adapter.build_start(&mut session, &mut build);
        assert_eq!(session.entry_file, "entry");
    }
}
