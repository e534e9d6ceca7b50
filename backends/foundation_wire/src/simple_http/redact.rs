//! Human-readable request dumps with credential-bearing headers masked.

use crate::simple_http::headers::SimpleHeader;
use crate::simple_http::request::{RequestDescriptor, SimpleRequest};
use serde::Deserialize;
use std::fmt::Write;

pub const DEFAULT_REDACTION_MARKER: &str = "<REDACTED>";

/// Which header values never appear in rendered output, and what replaces
/// them. Names match case-insensitively.
///
/// `Authorization` and `Proxy-Authorization` are always masked; `headers`
/// only adds names to that set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedactionPolicy {
    pub headers: Vec<String>,
    pub marker: String,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self {
            headers: vec![
                SimpleHeader::AUTHORIZATION.to_string(),
                SimpleHeader::PROXY_AUTHORIZATION.to_string(),
            ],
            marker: DEFAULT_REDACTION_MARKER.to_string(),
        }
    }
}

impl RedactionPolicy {
    #[must_use]
    pub fn is_sensitive(&self, name: &SimpleHeader) -> bool {
        *name == SimpleHeader::AUTHORIZATION
            || *name == SimpleHeader::PROXY_AUTHORIZATION
            || self.headers.iter().any(|sensitive| name.matches(sensitive))
    }

    /// `value`, or the marker when `name` is sensitive.
    #[must_use]
    pub fn mask<'a>(&'a self, name: &SimpleHeader, value: &'a str) -> &'a str {
        if self.is_sensitive(name) {
            &self.marker
        } else {
            value
        }
    }
}

/// Renders a request for logs: method, target, connection facts and one
/// line per header, with sensitive values replaced by the policy marker.
///
/// ```text
/// Request {
///   method  = PUT
///   uri     = http://localhost/foo
///   host    = localhost
///   port    = 80
///   secure  = false
///   headers =
///     Authorization: <REDACTED>
///     Content-Type: text/plain
/// }
/// ```
#[must_use]
pub fn render_redacted(request: &RequestDescriptor, policy: &RedactionPolicy) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render_into(&mut out, request, policy);
    out
}

/// [`render_redacted`] for a request that still owns its body; the body
/// shape (never its content) is appended.
#[must_use]
pub fn render_request_redacted(request: &SimpleRequest, policy: &RedactionPolicy) -> String {
    let mut out = String::new();
    let _ = render_into(&mut out, &request.descriptor(), policy);
    // drop the closing brace, add the body line, close again
    out.truncate(out.len() - "}\n".len());
    let _ = writeln!(out, "  body    = {:?}", request.body);
    out.push_str("}\n");
    out
}

fn render_into(
    out: &mut String,
    request: &RequestDescriptor,
    policy: &RedactionPolicy,
) -> std::fmt::Result {
    writeln!(out, "Request {{")?;
    writeln!(out, "  method  = {}", request.method)?;
    writeln!(out, "  uri     = {}", request.effective_uri())?;
    writeln!(out, "  host    = {}", request.host)?;
    writeln!(out, "  port    = {}", request.port)?;
    writeln!(out, "  secure  = {}", request.secure)?;
    writeln!(out, "  headers =")?;
    for (name, value) in request.headers.iter() {
        writeln!(out, "    {name}: {}", policy.mask(name, value))?;
    }
    writeln!(out, "}}")
}

impl core::fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_redacted(self, &RedactionPolicy::default()))
    }
}
