//! Request URI to filesystem target mapping.

use crate::config::ContentConfig;
use std::path::Path;

/// How a resolved target is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Bytes of an existing file
    Static,
    /// Output of a program run for this request
    Dynamic,
}

/// Where a request URI points on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: TargetKind,
    /// Document root followed by the URI path, e.g. `./cgi-bin/adder`
    pub file_path: String,
    /// Text after the first `?` of a dynamic URI, otherwise empty
    pub query: String,
}

impl Target {
    pub fn is_static(&self) -> bool {
        self.kind == TargetKind::Static
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.file_path)
    }
}

/// Maps request URIs onto paths under the document root.
///
/// Resolution is purely textual. The URI is glued onto the root as-is, so
/// `..` segments are followed wherever they lead; [`UriResolver::is_within_root`]
/// exists for callers that want to refuse such paths.
#[derive(Debug, Clone)]
pub struct UriResolver {
    doc_root: String,
    default_document: String,
    cgi_marker: String,
}

impl Default for UriResolver {
    fn default() -> Self {
        Self::new(&ContentConfig::default())
    }
}

impl UriResolver {
    pub fn new(cfg: &ContentConfig) -> Self {
        Self {
            doc_root: cfg.doc_root.clone(),
            default_document: cfg.default_document.clone(),
            cgi_marker: cfg.cgi_marker.clone(),
        }
    }

    /// Classifies `uri` and builds its filesystem path.
    ///
    /// Any URI containing the CGI marker is dynamic and has its query string
    /// split off at the first `?`. Everything else is static; a trailing `/`
    /// gets the default document appended. Static URIs keep any `?` as part
    /// of the file name.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::content::resolve::UriResolver;
    /// let target = UriResolver::default().resolve("/cgi-bin/adder?15&20");
    /// assert_eq!(target.file_path, "./cgi-bin/adder");
    /// assert_eq!(target.query, "15&20");
    /// ```
    pub fn resolve(&self, uri: &str) -> Target {
        if !uri.contains(self.cgi_marker.as_str()) {
            let mut file_path = format!("{}{}", self.doc_root, uri);
            if uri.ends_with('/') {
                file_path.push_str(&self.default_document);
            }

            return Target {
                kind: TargetKind::Static,
                file_path,
                query: String::new(),
            };
        }

        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));

        Target {
            kind: TargetKind::Dynamic,
            file_path: format!("{}{}", self.doc_root, path),
            query: query.to_string(),
        }
    }

    /// Whether `target` still lies under the document root once symlinks and
    /// `..` segments are resolved. Paths that cannot be canonicalized are
    /// treated as outside.
    pub async fn is_within_root(&self, target: &Target) -> bool {
        let root = match tokio::fs::canonicalize(&self.doc_root).await {
            Ok(root) => root,
            Err(_) => return false,
        };

        match tokio::fs::canonicalize(target.path()).await {
            Ok(path) => path.starts_with(root),
            Err(_) => false,
        }
    }
}
