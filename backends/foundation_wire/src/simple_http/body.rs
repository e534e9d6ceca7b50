//! Request bodies and the pull-sources that feed streaming ones.

use crate::extensions::result_ext::{BoxedError, BoxedResult};
use bytes::Bytes;
use std::io::Read;

/// Producer of body chunks, pulled one at a time.
///
/// `Ok(None)` marks the clean end of the body. A source is good for exactly
/// one pass: once it has returned `Ok(None)` or an error it is dropped.
/// Each call may block until the next chunk is available.
pub trait BodySource: Send {
    /// # Errors
    ///
    /// Returns whatever the upstream producer failed with; the send in
    /// progress is aborted.
    fn next_chunk(&mut self) -> Result<Option<Bytes>, BoxedError>;
}

/// Pull-source over an iterator of chunk results.
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Result<Bytes, BoxedError>> + Send,
{
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I> BodySource for IterSource<I>
where
    I: Iterator<Item = Result<Bytes, BoxedError>> + Send,
{
    fn next_chunk(&mut self) -> Result<Option<Bytes>, BoxedError> {
        self.inner.next().transpose()
    }
}

/// Pull-source over any [`Read`], handing out one `read` worth of bytes per
/// chunk.
pub struct ReaderSource<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: Read + Send> ReaderSource<R> {
    /// `buffer_size` bounds the size of each chunk; zero is bumped to one.
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; buffer_size.max(1)],
        }
    }
}

impl<R: Read + Send> BodySource for ReaderSource<R> {
    fn next_chunk(&mut self) -> Result<Option<Bytes>, BoxedError> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => return Ok(None),
                Ok(read) => return Ok(Some(Bytes::copy_from_slice(&self.buffer[..read]))),
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into_boxed_error()),
            }
        }
    }
}

/// Produces a fixed-length body's bytes on demand, once.
pub trait BodyBuilder: Send {
    /// # Errors
    ///
    /// Returns the failure of whatever produces the content.
    fn build(self: Box<Self>) -> Result<Bytes, BoxedError>;
}

impl<F> BodyBuilder for F
where
    F: FnOnce() -> Bytes + Send,
{
    fn build(self: Box<Self>) -> Result<Bytes, BoxedError> {
        Ok((*self)())
    }
}

/// Which framing header a body is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    ContentLength(u64),
    Chunked,
}

/// Body of an outgoing request.
///
/// The variant alone decides the framing: every sized variant goes out
/// with `Content-Length`, [`RequestBody::StreamChunked`] with
/// `Transfer-Encoding: chunked`. Streaming variants are consumed by the send
/// attempt and cannot be replayed.
#[derive(Default)]
pub enum RequestBody {
    #[default]
    Empty,
    FixedBytes(Bytes),
    /// Sequence of buffers written back to back; the length is their sum.
    FixedChunks(Vec<Bytes>),
    /// Declared length plus a builder producing exactly that many bytes.
    FixedBuilder(u64, Box<dyn BodyBuilder>),
    /// Pull-source with a caller-declared total length.
    StreamKnownLength(u64, Box<dyn BodySource>),
    /// Pull-source of unknown length.
    StreamChunked(Box<dyn BodySource>),
}

impl RequestBody {
    pub fn bytes<B: Into<Bytes>>(body: B) -> Self {
        Self::FixedBytes(body.into())
    }

    pub fn chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self::FixedChunks(chunks.into_iter().map(Into::into).collect())
    }

    pub fn builder<B: BodyBuilder + 'static>(length: u64, builder: B) -> Self {
        Self::FixedBuilder(length, Box::new(builder))
    }

    pub fn stream_with_length<S: BodySource + 'static>(length: u64, source: S) -> Self {
        Self::StreamKnownLength(length, Box::new(source))
    }

    pub fn stream<S: BodySource + 'static>(source: S) -> Self {
        Self::StreamChunked(Box::new(source))
    }

    /// Byte length when it is known up front.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Self::Empty => Some(0),
            Self::FixedBytes(bytes) => Some(bytes.len() as u64),
            Self::FixedChunks(chunks) => Some(chunks.iter().map(|c| c.len() as u64).sum()),
            Self::FixedBuilder(length, _) | Self::StreamKnownLength(length, _) => Some(*length),
            Self::StreamChunked(_) => None,
        }
    }

    #[must_use]
    pub fn framing(&self) -> Framing {
        match self.content_length() {
            Some(length) => Framing::ContentLength(length),
            None => Framing::Chunked,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Bytes> for RequestBody {
    fn from(value: Bytes) -> Self {
        Self::FixedBytes(value)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(value: Vec<u8>) -> Self {
        Self::FixedBytes(value.into())
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::FixedBytes(value.into())
    }
}

impl From<&'static str> for RequestBody {
    fn from(value: &'static str) -> Self {
        Self::FixedBytes(Bytes::from_static(value.as_bytes()))
    }
}

// content is never shown, only its shape
impl core::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::FixedBytes(bytes) => write!(f, "FixedBytes({} bytes)", bytes.len()),
            Self::FixedChunks(chunks) => write!(
                f,
                "FixedChunks({} chunks, {} bytes)",
                chunks.len(),
                chunks.iter().map(Bytes::len).sum::<usize>()
            ),
            Self::FixedBuilder(length, _) => write!(f, "FixedBuilder({length} bytes)"),
            Self::StreamKnownLength(length, _) => write!(f, "StreamKnownLength({length} bytes)"),
            Self::StreamChunked(_) => write!(f, "StreamChunked"),
        }
    }
}
