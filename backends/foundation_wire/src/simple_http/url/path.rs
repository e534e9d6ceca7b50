//! Path and query components of a URI.

use super::error::InvalidUri;
use std::fmt;

/// `path[?query]` after the authority, kept in its escaped form.
///
/// An empty path becomes `/`, a relative path gets a leading `/`, and an
/// empty query (`/path?`) is treated as no query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathAndQuery {
    path: String,
    query: Option<String>,
}

impl PathAndQuery {
    /// # Errors
    ///
    /// Returns `InvalidUri` if the path holds a character outside
    /// RFC 3986 `pchar` / `/`.
    pub(crate) fn parse(s: &str) -> Result<Self, InvalidUri> {
        let (path_str, query) = match s.split_once('?') {
            Some((path, query)) if query.is_empty() => (path, None),
            Some((path, query)) => (path, Some(query.to_string())),
            None => (s, None),
        };

        Self::validate_path(path_str)?;

        let path = if path_str.is_empty() {
            "/".to_string()
        } else if path_str.starts_with('/') {
            path_str.to_string()
        } else {
            format!("/{path_str}")
        };

        Ok(PathAndQuery { path, query })
    }

    // unreserved / pct-encoded / sub-delims / ":" / "@" / "/"
    fn validate_path(s: &str) -> Result<(), InvalidUri> {
        if let Some(bad) = s.chars().find(|c| {
            !(c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@/%".contains(*c))
        }) {
            return Err(InvalidUri::new(format!("invalid path character: {bad:?}")));
        }
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for PathAndQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
