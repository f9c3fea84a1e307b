//! Path decomposition used by the router.

/// A request path split on `/`.
///
/// Splitting is a pure function of the path: empty segments are dropped and a
/// trailing `?query` is ignored. The parameter is everything after the first
/// segment and its following `/`, so `/echo/a/b` has segments `["echo", "a", "b"]`
/// and parameter `a/b`, while `/echo/` has parameter `""` and `/echo` has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    segments: Vec<String>,
    parameter: Option<String>,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split_once('?').map_or(path, |(path, _query)| path);

        let segments = path.split('/').filter(|segment| !segment.is_empty()).map(str::to_owned).collect();

        let parameter = path.trim_start_matches('/').split_once('/').map(|(_first, rest)| rest.to_owned());

        Self { path: path.to_owned(), segments, parameter }
    }

    /// The path without its query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}
