//! Header names, the ordered header map, and request methods.

use std::convert::Infallible;
use std::str::FromStr;

/// HTTP header name.
///
/// Known names compare case-insensitively with their custom spelling
/// (`SimpleHeader::from("content-length") == SimpleHeader::CONTENT_LENGTH`)
/// and render in canonical casing. Custom names keep the caller's spelling
/// on the wire but still compare case-insensitively.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub enum SimpleHeader {
    ACCEPT,
    ACCEPT_ENCODING,
    AUTHORIZATION,
    CACHE_CONTROL,
    CONNECTION,
    CONTENT_ENCODING,
    CONTENT_LENGTH,
    CONTENT_TYPE,
    COOKIE,
    EXPECT,
    HOST,
    PROXY_AUTHORIZATION,
    TRANSFER_ENCODING,
    USER_AGENT,
    Custom(String),
}

impl SimpleHeader {
    pub fn custom<S: Into<String>>(value: S) -> Self {
        Self::from(value.into())
    }

    /// Wire spelling of the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ACCEPT => "Accept",
            Self::ACCEPT_ENCODING => "Accept-Encoding",
            Self::AUTHORIZATION => "Authorization",
            Self::CACHE_CONTROL => "Cache-Control",
            Self::CONNECTION => "Connection",
            Self::CONTENT_ENCODING => "Content-Encoding",
            Self::CONTENT_LENGTH => "Content-Length",
            Self::CONTENT_TYPE => "Content-Type",
            Self::COOKIE => "Cookie",
            Self::EXPECT => "Expect",
            Self::HOST => "Host",
            Self::PROXY_AUTHORIZATION => "Proxy-Authorization",
            Self::TRANSFER_ENCODING => "Transfer-Encoding",
            Self::USER_AGENT => "User-Agent",
            Self::Custom(inner) => inner,
        }
    }

    /// Case-insensitive comparison against a raw name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl PartialEq for SimpleHeader {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other.as_str())
    }
}

impl Eq for SimpleHeader {}

impl From<String> for SimpleHeader {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "ACCEPT" => Self::ACCEPT,
            "ACCEPT-ENCODING" => Self::ACCEPT_ENCODING,
            "AUTHORIZATION" => Self::AUTHORIZATION,
            "CACHE-CONTROL" => Self::CACHE_CONTROL,
            "CONNECTION" => Self::CONNECTION,
            "CONTENT-ENCODING" => Self::CONTENT_ENCODING,
            "CONTENT-LENGTH" => Self::CONTENT_LENGTH,
            "CONTENT-TYPE" => Self::CONTENT_TYPE,
            "COOKIE" => Self::COOKIE,
            "EXPECT" => Self::EXPECT,
            "HOST" => Self::HOST,
            "PROXY-AUTHORIZATION" => Self::PROXY_AUTHORIZATION,
            "TRANSFER-ENCODING" => Self::TRANSFER_ENCODING,
            "USER-AGENT" => Self::USER_AGENT,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for SimpleHeader {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl FromStr for SimpleHeader {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl core::fmt::Display for SimpleHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered header map with case-insensitive lookup.
///
/// Insertion order is the wire order. Values are opaque text; the map never
/// splits or joins them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SimpleHeaders {
    entries: Vec<(SimpleHeader, String)>,
}

impl SimpleHeaders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to a single value. An existing entry is overwritten in
    /// place (keeping its position) and any later duplicates are dropped;
    /// otherwise the entry is appended.
    pub fn insert<H: Into<SimpleHeader>, S: Into<String>>(&mut self, key: H, value: S) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter().position(|(name, _)| name == &key) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(name, _)| {
                    let keep = index <= first || name != &key;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Adds another value for `key`, keeping existing ones.
    pub fn append<H: Into<SimpleHeader>, S: Into<String>>(&mut self, key: H, value: S) {
        self.entries.push((key.into(), value.into()));
    }

    /// First value for `name`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.matches(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every value for `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.matches(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.matches(name))
    }

    /// Removes every entry for `name`.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| !key.matches(name));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SimpleHeader, &str)> + '_ {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: Into<SimpleHeader>, S: Into<String>> FromIterator<(H, S)> for SimpleHeaders {
    fn from_iter<I: IntoIterator<Item = (H, S)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (key, value) in iter {
            headers.append(key, value);
        }
        headers
    }
}

// masks credentials with the default policy so `{:?}` is always safe to log
impl core::fmt::Debug for SimpleHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = super::RedactionPolicy::default();
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|(key, value)| (key.as_str(), policy.mask(key, value))),
            )
            .finish()
    }
}

/// HTTP request method.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SimpleMethod {
    HEAD,
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    CONNECT,
    TRACE,
    Custom(String),
}

impl SimpleMethod {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SimpleMethod::HEAD => "HEAD",
            SimpleMethod::GET => "GET",
            SimpleMethod::POST => "POST",
            SimpleMethod::PUT => "PUT",
            SimpleMethod::DELETE => "DELETE",
            SimpleMethod::PATCH => "PATCH",
            SimpleMethod::OPTIONS => "OPTIONS",
            SimpleMethod::CONNECT => "CONNECT",
            SimpleMethod::TRACE => "TRACE",
            SimpleMethod::Custom(inner) => inner,
        }
    }

    /// GET and HEAD send no framing header at all when the body is empty.
    #[must_use]
    pub fn omits_empty_framing(&self) -> bool {
        matches!(self, SimpleMethod::GET | SimpleMethod::HEAD)
    }
}

impl From<&str> for SimpleMethod {
    fn from(value: &str) -> Self {
        match value {
            "HEAD" => Self::HEAD,
            "GET" => Self::GET,
            "POST" => Self::POST,
            "PUT" => Self::PUT,
            "DELETE" => Self::DELETE,
            "PATCH" => Self::PATCH,
            "OPTIONS" => Self::OPTIONS,
            "CONNECT" => Self::CONNECT,
            "TRACE" => Self::TRACE,
            // methods are case-sensitive tokens; keep anything else verbatim
            _ => Self::Custom(value.into()),
        }
    }
}

impl From<String> for SimpleMethod {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl core::fmt::Display for SimpleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
