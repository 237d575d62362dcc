//! Shared route table model.
//!
//! One entry per route the site's router resolved at build time, shared
//! by the build-phase compilers and the request-phase dispatcher. A
//! route's path is either a literal pathname or a segment list with its
//! matcher's regex source; the variant is carried explicitly rather than
//! inferred from which fields happen to be present.

use serde::{Deserialize, Serialize};

/// One path segment of a dynamic route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Literal text of the segment. Empty for dynamic segments.
    #[serde(default)]
    pub content: String,
    /// Whether the segment matches any value rather than its text.
    #[serde(default)]
    pub dynamic: bool,
}

impl Segment {
    /// A segment matching its text verbatim.
    pub fn literal(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            dynamic: false,
        }
    }

    /// A segment matching any value.
    pub fn dynamic() -> Self {
        Self {
            content: String::new(),
            dynamic: true,
        }
    }
}

/// The shape of a route's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoutePath {
    /// A fixed pathname, matched verbatim.
    Static {
        /// The literal pathname, leading slash included.
        pathname: String,
    },
    /// A parameterized path.
    Dynamic {
        /// The path split into literal and dynamic segments.
        segments: Vec<Segment>,
        /// Regex source of the route's matcher, with `/` escaped as
        /// `\/`. Consumed only by the edge manifest compiler.
        pattern: String,
    },
}

/// One route of the site's resolved route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Static or dynamic path shape.
    #[serde(flatten)]
    pub path: RoutePath,
    /// Where the route was prerendered to, when it was. A set value
    /// excludes the route from every routing artifact: the static file
    /// takes precedence over the server function.
    #[serde(default, rename = "distURL", skip_serializing_if = "Option::is_none")]
    pub dist_url: Option<String>,
}

impl RouteEntry {
    /// A route with a fixed pathname.
    pub fn static_route(pathname: impl Into<String>) -> Self {
        Self {
            path: RoutePath::Static {
                pathname: pathname.into(),
            },
            dist_url: None,
        }
    }

    /// A parameterized route with its matcher's regex source.
    pub fn dynamic_route(segments: Vec<Segment>, pattern: impl Into<String>) -> Self {
        Self {
            path: RoutePath::Dynamic {
                segments,
                pattern: pattern.into(),
            },
            dist_url: None,
        }
    }

    /// Mark the route as prerendered to the given file URL.
    pub fn with_dist_url(mut self, dist_url: impl Into<String>) -> Self {
        self.dist_url = Some(dist_url.into());
        self
    }

    /// Whether the route was already materialized as a static file.
    pub fn is_prerendered(&self) -> bool {
        self.dist_url.is_some()
    }

    /// The route's rewrite-rule pattern: the literal pathname for static
    /// routes; for dynamic routes, the segments joined with `/`, each
    /// dynamic segment widened to a `*` wildcard.
    pub fn rewrite_pattern(&self) -> String {
        match &self.path {
            RoutePath::Static { pathname } => pathname.clone(),
            RoutePath::Dynamic { segments, .. } => {
                let mut pattern = String::new();
                for segment in segments {
                    pattern.push('/');
                    if segment.dynamic {
                        pattern.push('*');
                    } else {
                        pattern.push_str(&segment.content);
                    }
                }
                pattern
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_rewrite_pattern_is_pathname() {
        let route = RouteEntry::static_route("/about");
        assert_eq!(route.rewrite_pattern(), "/about");
        assert!(!route.is_prerendered());
    }

    #[test]
    fn test_dynamic_rewrite_pattern_widens_to_wildcard() {
        let route = RouteEntry::dynamic_route(
            vec![Segment::literal("blog"), Segment::dynamic()],
            r"^\/blog\/([^/]+?)\/?$",
        );
        assert_eq!(route.rewrite_pattern(), "/blog/*");
    }

    #[test]
    fn test_nested_dynamic_segments() {
        let route = RouteEntry::dynamic_route(
            vec![
                Segment::literal("docs"),
                Segment::dynamic(),
                Segment::literal("edit"),
                Segment::dynamic(),
            ],
            r"^\/docs\/([^/]+?)\/edit\/([^/]+?)\/?$",
        );
        assert_eq!(route.rewrite_pattern(), "/docs/*/edit/*");
    }

    #[test]
    fn test_dist_url_marks_prerendered() {
        let route = RouteEntry::static_route("/").with_dist_url("file:///dist/index.html");
        assert!(route.is_prerendered());
        assert_eq!(route.dist_url.as_deref(), Some("file:///dist/index.html"));
    }

    #[test]
    fn test_route_table_json_shape() {
        // As emitted by the build tool: the path variant is decided by
        // which fields are present, and distURL keeps its wire name.
        let json = r#"[
            { "pathname": "/about" },
            { "pathname": "/", "distURL": "file:///dist/index.html" },
            {
                "segments": [
                    { "content": "blog", "dynamic": false },
                    { "content": "", "dynamic": true }
                ],
                "pattern": "^\\/blog\\/([^/]+?)\\/?$"
            }
        ]"#;
        let routes: Vec<RouteEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(routes[0].path, RoutePath::Static { pathname: "/about".to_string() });
        assert!(routes[1].is_prerendered());
        assert_eq!(routes[2].rewrite_pattern(), "/blog/*");

        let round = serde_json::to_value(&routes[1]).unwrap();
        assert_eq!(round["distURL"], "file:///dist/index.html");
        assert_eq!(round["pathname"], "/");
    }
}
