//! URI parsing and decoding errors.

use derive_more::From;
use std::fmt;
use std::string::FromUtf8Error;

/// Returned when a URI string cannot be split into scheme, authority and
/// path components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUri {
    message: String,
}

impl InvalidUri {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InvalidUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI: {}", self.message)
    }
}

impl std::error::Error for InvalidUri {}

/// Returned when a percent-encoded component is malformed.
///
/// Positions are byte offsets of the offending `%` in the encoded input.
#[derive(From, Debug, Clone, PartialEq, Eq)]
pub enum UriDecodeError {
    /// A `%` was not followed by two more bytes.
    #[from(ignore)]
    IncompleteEscape { position: usize },

    /// A `%` was followed by something other than two hex digits.
    #[from(ignore)]
    InvalidHexDigit { position: usize },

    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8(FromUtf8Error),
}

impl std::error::Error for UriDecodeError {}

impl fmt::Display for UriDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteEscape { position } => {
                write!(f, "incomplete percent-escape at byte {position}")
            }
            Self::InvalidHexDigit { position } => {
                write!(f, "invalid hex digit in percent-escape at byte {position}")
            }
            Self::InvalidUtf8(err) => write!(f, "decoded bytes are not UTF-8: {err}"),
        }
    }
}
