//! Build-tool configuration surface consumed by the adapter.
//!
//! These types mirror the slice of the build tool's configuration the
//! adapter reads and mutates through its lifecycle hooks. The adapter
//! only ever sets its own output fields; everything else belongs to the
//! build tool.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options accepted by the adapter from the site's configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetlifyOptions {
    /// Override for the client output directory. Defaults to
    /// `<root>/dist`.
    pub dist: Option<PathBuf>,
    /// Extra MIME types whose response bodies are base64-encoded.
    pub binary_media_types: Vec<String>,
}

impl NetlifyOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client output directory.
    pub fn dist(mut self, dist: impl Into<PathBuf>) -> Self {
        self.dist = Some(dist.into());
        self
    }

    /// Add a binary media type.
    pub fn binary_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.binary_media_types.push(media_type.into());
        self
    }
}

/// The project's overall output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Fully prerendered site; no server function is needed.
    Static,
    /// Server-rendered site.
    #[default]
    Server,
}

/// Client/server split of the build output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Where client assets are written.
    pub client: Option<PathBuf>,
    /// Where the server entry is written.
    pub server: Option<PathBuf>,
    /// File name of the server entry (e.g. "entry.mjs").
    pub server_entry: String,
    /// Chunk file naming scheme of the underlying bundler, when set.
    /// Only finalized late in the build.
    pub chunk_file_names: Option<String>,
}

/// The build tool's resolved site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Project root directory.
    pub root: PathBuf,
    /// Top-level output directory.
    pub out_dir: PathBuf,
    /// Overall output mode.
    pub output: OutputMode,
    /// Build target split.
    pub build: BuildSettings,
}

impl SiteConfig {
    /// Create a config rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            out_dir: root.join("dist"),
            root,
            output: OutputMode::Server,
            build: BuildSettings {
                client: None,
                server: None,
                server_entry: "entry.mjs".to_string(),
                chunk_file_names: None,
            },
        }
    }

    /// Set the output mode.
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_defaults() {
        let config = SiteConfig::new("/srv/site");
        assert_eq!(config.out_dir, PathBuf::from("/srv/site/dist"));
        assert_eq!(config.output, OutputMode::Server);
        assert_eq!(config.build.server_entry, "entry.mjs");
        assert!(config.build.client.is_none());
    }

    #[test]
    fn test_output_mode_serde() {
        assert_eq!(
            serde_json::to_string(&OutputMode::Static).unwrap(),
            r#""static""#
        );
        let mode: OutputMode = serde_json::from_str(r#""server""#).unwrap();
        assert_eq!(mode, OutputMode::Server);
    }

    #[test]
    fn test_options_builder() {
        let options = NetlifyOptions::new()
            .dist("/srv/site/public")
            .binary_media_type("application/wasm");
        assert_eq!(options.dist, Some(PathBuf::from("/srv/site/public")));
        assert_eq!(options.binary_media_types, vec!["application/wasm"]);
    }
}
