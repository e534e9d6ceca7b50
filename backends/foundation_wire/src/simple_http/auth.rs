//! Basic authentication header values (RFC 7617).

use crate::simple_http::headers::{SimpleHeader, SimpleHeaders};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// `Basic ` followed by the padded standard Base64 of `username:password`.
///
/// ```
/// use foundation_wire::simple_http::basic_auth_value;
///
/// assert_eq!(basic_auth_value("user", "pass"), "Basic dXNlcjpwYXNz");
/// ```
#[must_use]
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let mut plain = Vec::with_capacity(username.len() + 1 + password.len());
    plain.extend_from_slice(username.as_bytes());
    plain.push(b':');
    plain.extend_from_slice(password.as_bytes());
    format!("Basic {}", STANDARD.encode(plain))
}

/// Sets `Authorization` in `headers`, replacing any existing value.
pub fn apply_basic_auth(headers: &mut SimpleHeaders, username: &str, password: &str) {
    headers.insert(
        SimpleHeader::AUTHORIZATION,
        basic_auth_value(username, password),
    );
}

/// Sets `Proxy-Authorization` in `headers`, replacing any existing value.
pub fn apply_basic_proxy_auth(headers: &mut SimpleHeaders, username: &str, password: &str) {
    headers.insert(
        SimpleHeader::PROXY_AUTHORIZATION,
        basic_auth_value(username, password),
    );
}
