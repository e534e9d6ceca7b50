//! URI scheme component.

use super::error::InvalidUri;
use std::fmt;

/// URI scheme, normalised to lowercase.
///
/// Only `http` and `https` map to a request; any other syntactically valid
/// scheme parses as [`Scheme::is_supported`] `== false` so callers can reject
/// it with a precise error instead of a generic parse failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scheme {
    inner: SchemeInner,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SchemeInner {
    Http,
    Https,
    Other(String),
}

impl Scheme {
    pub const HTTP: Scheme = Scheme {
        inner: SchemeInner::Http,
    };

    pub const HTTPS: Scheme = Scheme {
        inner: SchemeInner::Https,
    };

    /// Splits `scheme:` off the front of `uri`, returning the scheme and
    /// everything after the colon.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUri` when there is no colon, the scheme is empty, or
    /// it is not `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    pub(crate) fn parse_from_uri(uri: &str) -> Result<(Self, &str), InvalidUri> {
        let colon_pos = uri
            .find(':')
            .ok_or_else(|| InvalidUri::new("missing scheme (no ':' found)"))?;

        let scheme_str = &uri[..colon_pos];
        if !Self::is_valid_scheme(scheme_str) {
            return Err(InvalidUri::new(format!("invalid scheme: {scheme_str:?}")));
        }

        Ok((Self::from_name(scheme_str), &uri[colon_pos + 1..]))
    }

    fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "http" => Self::HTTP,
            "https" => Self::HTTPS,
            _ => Scheme {
                inner: SchemeInner::Other(lower),
            },
        }
    }

    fn is_valid_scheme(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.inner {
            SchemeInner::Http => "http",
            SchemeInner::Https => "https",
            SchemeInner::Other(s) => s,
        }
    }

    /// Default port for the scheme: 80 for `http`, 443 for `https`, `None`
    /// for anything else.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        match &self.inner {
            SchemeInner::Http => Some(80),
            SchemeInner::Https => Some(443),
            SchemeInner::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_https(&self) -> bool {
        matches!(self.inner, SchemeInner::Https)
    }

    /// True for the two schemes a request can be built from.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self.inner, SchemeInner::Http | SchemeInner::Https)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
