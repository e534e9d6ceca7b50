use crate::extensions::result_ext::BoxedError;
use crate::simple_http::url::{InvalidUri, UriDecodeError};
use derive_more::From;

pub type RequestSendResult<T> = std::result::Result<T, RequestSendError>;

/// Failures while writing a request to a sink.
///
/// None of these are retried here. Bytes written before the failure stand
/// and the connection should be treated as unusable.
#[derive(From, Debug)]
pub enum RequestSendError {
    /// The sink rejected a write of the head or the body.
    SinkWrite(std::io::Error),

    /// The body's pull-source failed to produce the next chunk.
    #[from(ignore)]
    SourceRead(BoxedError),

    /// A fixed-length body produced a different number of bytes than it
    /// declared. Excess bytes are never written.
    #[from(ignore)]
    BodyLengthMismatch { declared: u64, actual: u64 },

    /// A header name or value would break the header block (CR, LF or an
    /// empty name). Raised before any byte is written.
    #[from(ignore)]
    InvalidHeader(String),

    /// The method or the request target would break the request line (an
    /// empty or non-token method, or CR, LF or SP in the target). Names the
    /// offending part. Raised before any byte is written.
    #[from(ignore)]
    InvalidRequestLine(&'static str),
}

impl std::error::Error for RequestSendError {}

impl core::fmt::Display for RequestSendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SinkWrite(err) => write!(f, "failed writing request to sink: {err}"),
            Self::SourceRead(err) => write!(f, "failed pulling request body chunk: {err}"),
            Self::BodyLengthMismatch { declared, actual } => write!(
                f,
                "request body declared {declared} bytes but produced {actual}"
            ),
            Self::InvalidHeader(name) => write!(f, "header {name:?} cannot be serialized"),
            Self::InvalidRequestLine(part) => {
                write!(f, "request {part} cannot be serialized on the request line")
            }
        }
    }
}

pub type RequestParseResult<T> = std::result::Result<T, RequestParseError>;

/// Failures while building a request from a URI.
#[derive(From, Debug)]
pub enum RequestParseError {
    InvalidUri(InvalidUri),

    /// The URI scheme is neither `http` nor `https`; there is no request to
    /// build for it.
    #[from(ignore)]
    UnsupportedScheme(String),

    /// The URI has no authority to take a host from.
    #[from(ignore)]
    MissingHost,

    /// The URI userinfo holds a malformed percent-escape.
    CredentialDecode(UriDecodeError),
}

impl std::error::Error for RequestParseError {}

impl core::fmt::Display for RequestParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUri(err) => write!(f, "{err}"),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "unsupported URI scheme: {scheme} (only http and https are supported)"
            ),
            Self::MissingHost => write!(f, "URI has no host"),
            Self::CredentialDecode(err) => write!(f, "invalid URI credentials: {err}"),
        }
    }
}

/// Failures while loading a [`super::RenderConfig`].
#[derive(From, Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
}

impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid render configuration: {err}"),
        }
    }
}
