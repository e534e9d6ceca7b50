//! Credentials embedded in a URI's userinfo.

use super::error::UriDecodeError;
use super::percent::percent_decode;
use super::Uri;
use std::fmt;

/// Decoded `user:password` pair taken from a URI.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.username, self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Extracts the credential pair from `uri`'s userinfo.
///
/// Yields `Some` only when the userinfo holds a `:` with a non-empty part in
/// front of it; the password may be empty. The first `:` splits the pair, so
/// a password may contain further colons. Both halves are percent-decoded.
///
/// # Errors
///
/// Returns `UriDecodeError` when either half holds a malformed escape.
pub fn extract_credentials(uri: &Uri) -> Result<Option<Credentials>, UriDecodeError> {
    let Some(userinfo) = uri.authority().and_then(|auth| auth.userinfo()) else {
        return Ok(None);
    };
    credentials_from_userinfo(userinfo)
}

/// Same rule as [`extract_credentials`] applied to raw userinfo text.
///
/// # Errors
///
/// Returns `UriDecodeError` when either half holds a malformed escape.
pub fn credentials_from_userinfo(userinfo: &str) -> Result<Option<Credentials>, UriDecodeError> {
    match userinfo.split_once(':') {
        Some((user, pass)) if !user.is_empty() => Ok(Some(Credentials {
            username: percent_decode(user)?,
            password: percent_decode(pass)?,
        })),
        _ => Ok(None),
    }
}
