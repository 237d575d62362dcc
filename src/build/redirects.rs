//! Redirect-rule compiler.
//!
//! Translates the route table into Netlify's plaintext `_redirects`
//! format: one tab-separated rule per line mapping a path or wildcard
//! pattern to the server function.

use crate::build::session::DeployTarget;
use crate::build::BuildError;
use crate::routes::RouteEntry;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// File name of the platform's rewrite-rule file.
const REDIRECTS_FILE: &str = "_redirects";

/// Render the rewrite rules for all eligible routes.
///
/// Routes already materialized as static files (`distURL` set) are
/// skipped so prerendered assets keep precedence over the function. An
/// empty route table renders to an empty string.
pub fn render_redirects(routes: &[RouteEntry], entry_file: &str, target: DeployTarget) -> String {
    let mut rules = String::new();
    for route in routes {
        if route.is_prerendered() {
            continue;
        }
        rules.push_str(&format!(
            "\n{}\t/.netlify/{}/{}\t200",
            route.rewrite_pattern(),
            target.as_str(),
            entry_file
        ));
    }
    rules
}

/// Append rewrite rules for the route table to `<dir>/_redirects`.
///
/// Always appends: the file may already carry rules for unrelated static
/// assets (e.g. a `public/_redirects` copied into the output directory)
/// and must never be truncated. Appending is consequently not idempotent
/// across repeated builds into the same directory; each build into a
/// fresh output directory writes each rule exactly once.
pub async fn append_redirects(
    routes: &[RouteEntry],
    dir: &Path,
    entry_file: &str,
    target: DeployTarget,
) -> Result<(), BuildError> {
    let rules = render_redirects(routes, entry_file, target);

    let path = dir.join(REDIRECTS_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(rules.as_bytes()).await?;
    file.flush().await?;

    info!(path = %path.display(), routes = routes.len(), "appended redirect rules");
    Ok(())
}
