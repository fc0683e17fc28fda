/// Rewrites mount paths that live under a configured source prefix to the
/// equivalent path under a destination prefix.
///
/// The exact source prefix (e.g. `/home`) maps to the destination with a
/// single trailing slash (`/blah/home/`) to emphasize directory semantics.
/// Descendants (`/home/alice`) keep everything after the prefix boundary
/// (`/blah/home/alice`). Every other path is returned unchanged.
#[derive(Clone, Debug)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        RewriteRule {
            from: from.into(),
            to: to.into(),
        }
    }

    // source prefix with exactly one trailing separator
    fn source_prefix(&self) -> String {
        format!("{}/", self.from.trim_end_matches('/'))
    }

    // destination with trailing separators stripped
    fn destination(&self) -> &str {
        self.to.trim_end_matches('/')
    }

    /// True when `path` is the source prefix itself or a strict descendant
    /// of it.
    pub fn matches(&self, path: &str) -> bool {
        path == self.from || path.starts_with(&self.source_prefix())
    }

    /// Maps `path` under the rule. Total: paths outside the source prefix
    /// come back unchanged.
    pub fn rewrite(&self, path: &str) -> String {
        if path == self.from {
            return format!("{}/", self.destination());
        }
        if let Some(suffix) = path.strip_prefix(&self.source_prefix()) {
            return format!("{}/{}", self.destination(), suffix);
        }
        path.to_owned()
    }
}
