//! The request value handed to the serializer.

use crate::simple_http::auth;
use crate::simple_http::body::RequestBody;
use crate::simple_http::errors::{RequestParseError, RequestParseResult};
use crate::simple_http::headers::{SimpleHeader, SimpleHeaders, SimpleMethod};
use crate::simple_http::url::{extract_credentials, Uri};

/// An outgoing HTTP/1.1 request.
///
/// Built once through [`SimpleRequest::builder`] (or from a URI) and then
/// consumed by a send. The header-level helpers (`with_basic_auth`,
/// `with_header`) return a new request and leave method, path and body
/// untouched.
pub struct SimpleRequest {
    pub method: SimpleMethod,
    /// Already-escaped path.
    pub path: String,
    /// Already-escaped query, without the leading `?`.
    pub query: Option<String>,
    pub headers: SimpleHeaders,
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub body: RequestBody,
}

/// Everything about a request except its body; cheap to clone and safe to
/// keep around for diagnostics after the body has been sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: SimpleMethod,
    pub path: String,
    pub query: Option<String>,
    pub headers: SimpleHeaders,
    pub host: String,
    pub port: u16,
    pub secure: bool,
}

/// Default port for the given secure flag.
#[must_use]
pub fn default_port(secure: bool) -> u16 {
    if secure {
        443
    } else {
        80
    }
}

impl SimpleRequest {
    #[must_use]
    pub fn builder() -> SimpleRequestBuilder {
        SimpleRequestBuilder::default()
    }

    /// Builds a GET request for an absolute `http`/`https` URI.
    ///
    /// Credentials in the URI's userinfo become a Basic `Authorization`
    /// header.
    ///
    /// # Errors
    ///
    /// `UnsupportedScheme` for any other scheme, `MissingHost` when the URI
    /// has no authority, `CredentialDecode` for malformed userinfo escapes.
    pub fn from_uri(uri: &Uri) -> RequestParseResult<Self> {
        let scheme = uri.scheme();
        if !scheme.is_supported() {
            return Err(RequestParseError::UnsupportedScheme(scheme.to_string()));
        }

        let host = uri.host_str().ok_or(RequestParseError::MissingHost)?;
        let secure = scheme.is_https();

        let mut builder = Self::builder()
            .with_host(host)
            .with_secure(secure)
            .with_port(uri.port().unwrap_or_else(|| default_port(secure)))
            .with_path(uri.path())
            .with_some_query(uri.query().map(String::from));

        if let Some(credentials) = extract_credentials(uri)? {
            builder = builder.with_basic_auth(credentials.username(), credentials.password());
        }

        Ok(builder.build())
    }

    /// Parses `url` and builds the request like [`SimpleRequest::from_uri`].
    ///
    /// # Errors
    ///
    /// `InvalidUri` when `url` does not parse, otherwise as `from_uri`.
    pub fn parse(url: &str) -> RequestParseResult<Self> {
        Self::from_uri(&Uri::parse(url)?)
    }

    #[must_use]
    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            host: self.host.clone(),
            port: self.port,
            secure: self.secure,
        }
    }

    /// `scheme://host[:port]/path[?query]`, with the port omitted only when
    /// it is the scheme's default.
    #[must_use]
    pub fn effective_uri(&self) -> String {
        effective_uri(self.secure, &self.host, self.port, &self.request_target())
    }

    /// Origin-form target used on the request line.
    #[must_use]
    pub fn request_target(&self) -> String {
        request_target(&self.path, self.query.as_deref())
    }

    /// Sets or replaces one header.
    #[must_use]
    pub fn with_header<H: Into<SimpleHeader>, S: Into<String>>(mut self, key: H, value: S) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Sets `Authorization: Basic ...` for the given credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        auth::apply_basic_auth(&mut self.headers, username, password);
        self
    }

    /// Sets `Proxy-Authorization: Basic ...` for the given credentials.
    #[must_use]
    pub fn with_basic_proxy_auth(mut self, username: &str, password: &str) -> Self {
        auth::apply_basic_proxy_auth(&mut self.headers, username, password);
        self
    }

    /// Whether the caller asked for the two-phase `Expect: 100-continue` send.
    #[must_use]
    pub fn expects_continue(&self) -> bool {
        self.headers
            .get_all("Expect")
            .any(|value| value.trim().eq_ignore_ascii_case("100-continue"))
    }
}

impl RequestDescriptor {
    #[must_use]
    pub fn effective_uri(&self) -> String {
        effective_uri(
            self.secure,
            &self.host,
            self.port,
            &request_target(&self.path, self.query.as_deref()),
        )
    }
}

pub(crate) fn request_target(path: &str, query: Option<&str>) -> String {
    let mut target = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if let Some(query) = query {
        let query = query.strip_prefix('?').unwrap_or(query);
        if !query.is_empty() {
            target.push('?');
            target.push_str(query);
        }
    }

    target
}

/// `host` or `host:port`, dropping the port only when it is the default
/// for `secure` (80 plain, 443 secure).
pub(crate) fn host_with_port(secure: bool, host: &str, port: u16) -> String {
    if port == default_port(secure) {
        host.to_string()
    } else {
        format!("{host}:{port}")
    }
}

fn effective_uri(secure: bool, host: &str, port: u16, target: &str) -> String {
    let scheme = if secure { "https" } else { "http" };
    format!("{scheme}://{}{target}", host_with_port(secure, host, port))
}

impl core::fmt::Debug for SimpleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("body", &self.body)
            .finish()
    }
}

#[derive(Default)]
pub struct SimpleRequestBuilder {
    method: Option<SimpleMethod>,
    path: Option<String>,
    query: Option<String>,
    headers: Option<SimpleHeaders>,
    host: Option<String>,
    port: Option<u16>,
    secure: bool,
    body: Option<RequestBody>,
}

impl SimpleRequestBuilder {
    #[must_use]
    pub fn with_method(mut self, method: SimpleMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_some_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Marks the request as going over TLS; the default port becomes 443.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: SimpleHeaders) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets or replaces a header.
    pub fn add_header<H: Into<SimpleHeader>, S: Into<String>>(mut self, key: H, value: S) -> Self {
        self.headers.get_or_insert_with(SimpleHeaders::new).insert(key, value);
        self
    }

    /// Adds a header value, keeping earlier values for the same name.
    pub fn append_header<H: Into<SimpleHeader>, S: Into<String>>(
        mut self,
        key: H,
        value: S,
    ) -> Self {
        self.headers.get_or_insert_with(SimpleHeaders::new).append(key, value);
        self
    }

    #[must_use]
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        auth::apply_basic_auth(
            self.headers.get_or_insert_with(SimpleHeaders::new),
            username,
            password,
        );
        self
    }

    #[must_use]
    pub fn with_basic_proxy_auth(mut self, username: &str, password: &str) -> Self {
        auth::apply_basic_proxy_auth(
            self.headers.get_or_insert_with(SimpleHeaders::new),
            username,
            password,
        );
        self
    }

    pub fn with_body<B: Into<RequestBody>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the request. Unset parts default to `GET`, `/`, `localhost`,
    /// the default port for the secure flag, no headers and an empty body.
    #[must_use]
    pub fn build(self) -> SimpleRequest {
        SimpleRequest {
            method: self.method.unwrap_or(SimpleMethod::GET),
            path: self.path.unwrap_or_else(|| "/".into()),
            query: self.query,
            headers: self.headers.unwrap_or_default(),
            host: self.host.unwrap_or_else(|| "localhost".into()),
            port: self.port.unwrap_or_else(|| default_port(self.secure)),
            secure: self.secure,
            body: self.body.unwrap_or_default(),
        }
    }
}
