//! Chunked transfer coding for outgoing bodies (RFC 9112 section 7.1).
//!
//!   chunked-body   = *chunk last-chunk trailer-section CRLF
//!   chunk          = chunk-size CRLF chunk-data CRLF
//!   last-chunk     = 1*("0") CRLF
//!
//! Chunk sizes are written in lowercase hex, without extensions. Trailers
//! are not supported, so the body always ends with `0\r\n\r\n`.

use crate::extensions::result_ext::BoxedError;
use crate::io::ConnectionSink;
use crate::simple_http::body::BodySource;
use crate::simple_http::errors::{RequestSendError, RequestSendResult};
use bytes::{BufMut, Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";
const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkedData {
    /// A non-empty chunk of body bytes.
    Data(Bytes),
    /// The terminating zero-size chunk and the empty trailer section.
    DataEnded,
}

impl ChunkedData {
    /// Wire form of this chunk.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        match self {
            ChunkedData::Data(data) => {
                let size_line = format!("{:x}\r\n", data.len());
                let mut framed = BytesMut::with_capacity(size_line.len() + data.len() + CRLF.len());
                framed.put_slice(size_line.as_bytes());
                framed.put_slice(&data);
                framed.put_slice(CRLF);
                framed.freeze()
            }
            ChunkedData::DataEnded => Bytes::from_static(LAST_CHUNK),
        }
    }
}

/// Pulls chunks from a [`BodySource`] and yields them as [`ChunkedData`],
/// one source chunk at a time and in source order.
///
/// Empty chunks from the source are skipped. Exactly one
/// [`ChunkedData::DataEnded`] follows the end of the source, even when the
/// source produced nothing at all. After an error the encoder is exhausted.
pub struct ChunkedEncoder {
    source: Option<Box<dyn BodySource>>,
    finished: bool,
}

impl ChunkedEncoder {
    #[must_use]
    pub fn new(source: Box<dyn BodySource>) -> Self {
        Self {
            source: Some(source),
            finished: false,
        }
    }

    /// Encodes the whole source straight into `sink` and returns the number
    /// of payload bytes (excluding framing) written.
    ///
    /// # Errors
    ///
    /// `SourceRead` when the source fails, `SinkWrite` when the sink does.
    /// Chunks written before the failure stand.
    pub fn write_to<S: ConnectionSink + ?Sized>(self, sink: &mut S) -> RequestSendResult<u64> {
        let mut payload = 0u64;
        for chunk in self {
            let chunk = chunk.map_err(RequestSendError::SourceRead)?;
            if let ChunkedData::Data(data) = &chunk {
                payload += data.len() as u64;
            }
            sink.write_bytes(&chunk.into_bytes())
                .map_err(RequestSendError::SinkWrite)?;
        }
        Ok(payload)
    }
}

impl Iterator for ChunkedEncoder {
    type Item = Result<ChunkedData, BoxedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(source) = self.source.as_mut() else {
                self.finished = true;
                return Some(Ok(ChunkedData::DataEnded));
            };

            match source.next_chunk() {
                Ok(Some(data)) if data.is_empty() => continue,
                Ok(Some(data)) => return Some(Ok(ChunkedData::Data(data))),
                Ok(None) => {
                    // release the source before the terminator goes out
                    self.source = None;
                }
                Err(err) => {
                    self.source = None;
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
