//! Serializer and renderer configuration.

use crate::simple_http::body::{ReaderSource, RequestBody};
use crate::simple_http::errors::ConfigError;
use crate::simple_http::redact::RedactionPolicy;
use serde::Deserialize;
use std::io::Read;

pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip";
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 8192;

/// Knobs for [`super::RequestWriter`] and the redacting renderer.
///
/// Every field has a default, so a TOML document only names what it
/// changes:
///
/// ```toml
/// accept_encoding = "gzip, br"
/// stream_buffer_size = 16384
///
/// [redaction]
/// # added to Authorization and Proxy-Authorization, which are always masked
/// headers = ["Cookie"]
/// marker = "***"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Value of the synthesized `Accept-Encoding` header; `None` or an empty
    /// string turns the synthesis off.
    pub accept_encoding: Option<String>,

    /// Read size for reader-backed pull-sources.
    pub stream_buffer_size: usize,

    pub redaction: RedactionPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            accept_encoding: Some(DEFAULT_ACCEPT_ENCODING.to_string()),
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
            redaction: RedactionPolicy::default(),
        }
    }
}

impl RenderConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or mistyped fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Chunked streaming body over `reader`, read `stream_buffer_size`
    /// bytes at a time.
    pub fn reader_body<R: Read + Send + 'static>(&self, reader: R) -> RequestBody {
        RequestBody::stream(ReaderSource::new(reader, self.stream_buffer_size))
    }

    /// Like [`RenderConfig::reader_body`] but framed with `Content-Length`;
    /// the reader must yield exactly `length` bytes.
    pub fn sized_reader_body<R: Read + Send + 'static>(&self, length: u64, reader: R) -> RequestBody {
        RequestBody::stream_with_length(length, ReaderSource::new(reader, self.stream_buffer_size))
    }
}
