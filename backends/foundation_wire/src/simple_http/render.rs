//! HTTP/1.1 request serialization.
//!
//! WHY: The bytes a request goes out as must be exact: one framing header
//! derived from the body and never from caller headers, a synthesized
//! `Host`, and an `Expect: 100-continue` send that stops after the head
//! until the caller has seen the interim response.
//!
//! WHAT: [`RequestWriter`] plans the head of a [`SimpleRequest`] and writes
//! it, then the body, to a [`ConnectionSink`]. When the request expects a
//! `100 Continue`, the body is handed back as a [`ContinueBody`] instead.
//!
//! HOW: [`Http11RequestIterator`] walks the request through
//! [`Http11ReqState`], yielding one wire fragment per step and pulling body
//! chunks only as they are asked for, so streaming bodies are never held
//! in memory as a whole.

use crate::io::ConnectionSink;
use crate::simple_http::body::{BodySource, Framing, RequestBody};
use crate::simple_http::chunked::{ChunkedData, ChunkedEncoder};
use crate::simple_http::config::RenderConfig;
use crate::simple_http::errors::{RequestSendError, RequestSendResult};
use crate::simple_http::headers::{SimpleHeader, SimpleHeaders, SimpleMethod};
use crate::simple_http::request::{host_with_port, SimpleRequest};
use bytes::{BufMut, Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";
const HTTP_VERSION: &str = "HTTP/1.1";

/// The wire-ready head of a request: request line parts plus the final
/// header list, synthesized headers included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestHead {
    pub method: SimpleMethod,
    pub target: String,
    pub headers: SimpleHeaders,
    /// `None` for GET and HEAD with an empty body, which carry no framing
    /// header.
    pub framing: Option<Framing>,
}

impl RequestHead {
    /// Request line, header lines and the blank line ending the head.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let line = self.request_line();
        let block = self.header_block();
        let mut head = BytesMut::with_capacity(line.len() + block.len());
        head.put_slice(line.as_bytes());
        head.put_slice(&block);
        head.freeze()
    }

    fn request_line(&self) -> String {
        format!("{} {} {HTTP_VERSION}\r\n", self.method, self.target)
    }

    fn header_block(&self) -> Bytes {
        let mut block = BytesMut::with_capacity(256);
        for (name, value) in self.headers.iter() {
            block.put_slice(name.as_str().as_bytes());
            block.put_slice(b": ");
            block.put_slice(value.as_bytes());
            block.put_slice(CRLF);
        }
        block.put_slice(CRLF);
        block.freeze()
    }
}

/// Writes requests to sinks.
///
/// # Examples
///
/// ```
/// use foundation_wire::simple_http::{RequestWriter, SimpleMethod, SimpleRequest};
///
/// let request = SimpleRequest::builder()
///     .with_method(SimpleMethod::PUT)
///     .with_path("foo")
///     .with_body("data")
///     .build();
///
/// let mut sink: Vec<u8> = Vec::new();
/// let pending = RequestWriter::new().send(request, &mut sink).unwrap();
///
/// assert!(pending.is_none());
/// assert_eq!(
///     sink,
///     b"PUT /foo HTTP/1.1\r\nHost: localhost\r\nAccept-Encoding: gzip\r\nContent-Length: 4\r\n\r\ndata"
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestWriter {
    config: RenderConfig,
}

impl RequestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Computes the head `request` would be sent with.
    ///
    /// Header order is: `Host` (unless the caller set one), `Accept-Encoding`
    /// (unless the caller set one), the framing header, then the caller's
    /// headers in insertion order. Caller `Content-Length` and
    /// `Transfer-Encoding` headers are dropped, as is a caller
    /// `Accept-Encoding` with an empty value.
    ///
    /// # Errors
    ///
    /// `InvalidRequestLine` when the method is not a token or the target
    /// holds CR, LF or SP. `InvalidHeader` when a header name is not a
    /// token or a value holds CR or LF.
    pub fn plan(&self, request: &SimpleRequest) -> RequestSendResult<RequestHead> {
        validate_method(&request.method)?;
        let target = request.request_target();
        validate_target(&target)?;

        let framing = if request.body.content_length() == Some(0)
            && request.method.omits_empty_framing()
        {
            None
        } else {
            Some(request.body.framing())
        };

        let mut headers = SimpleHeaders::new();

        if !request.headers.contains(SimpleHeader::HOST.as_str()) {
            headers.append(
                SimpleHeader::HOST,
                host_with_port(request.secure, &request.host, request.port),
            );
        }

        if !request.headers.contains(SimpleHeader::ACCEPT_ENCODING.as_str()) {
            if let Some(encoding) = self.config.accept_encoding.as_deref() {
                if !encoding.is_empty() {
                    headers.append(SimpleHeader::ACCEPT_ENCODING, encoding);
                }
            }
        }

        match framing {
            Some(Framing::ContentLength(length)) => {
                headers.append(SimpleHeader::CONTENT_LENGTH, length.to_string());
            }
            Some(Framing::Chunked) => {
                headers.append(SimpleHeader::TRANSFER_ENCODING, "chunked");
            }
            None => {}
        }

        for (name, value) in request.headers.iter() {
            if *name == SimpleHeader::CONTENT_LENGTH || *name == SimpleHeader::TRANSFER_ENCODING {
                debug!("dropping caller framing header {}", name);
                continue;
            }
            if *name == SimpleHeader::ACCEPT_ENCODING && value.is_empty() {
                continue;
            }
            headers.append(name.clone(), value);
        }

        for (name, value) in headers.iter() {
            validate_header(name, value)?;
        }

        Ok(RequestHead {
            method: request.method.clone(),
            target,
            headers,
            framing,
        })
    }

    /// Head bytes for `request`, without writing anything.
    ///
    /// # Errors
    ///
    /// As [`RequestWriter::plan`].
    pub fn render_head(&self, request: &SimpleRequest) -> RequestSendResult<Bytes> {
        Ok(self.plan(request)?.to_bytes())
    }

    /// Sends `request` through `sink`.
    ///
    /// Without `Expect: 100-continue` the head and the body are written and
    /// `None` comes back. With it, only the head is written (and flushed);
    /// the body is returned as a [`ContinueBody`] for the caller to send,
    /// or not, once it has read the interim response.
    ///
    /// # Errors
    ///
    /// `InvalidRequestLine` and `InvalidHeader` before anything is written;
    /// `SinkWrite`,
    /// `SourceRead` and `BodyLengthMismatch` abort the send part way, and
    /// bytes already written stand.
    pub fn send<S: ConnectionSink + ?Sized>(
        &self,
        request: SimpleRequest,
        sink: &mut S,
    ) -> RequestSendResult<Option<ContinueBody>> {
        let head = self.plan(&request)?;
        let framing = head.framing;
        debug!(
            "sending {} {} with framing {:?}",
            head.method,
            head.target,
            framing
        );

        if request.expects_continue() {
            write_fragments(Http11RequestIterator::head(head), sink)?;
            debug!("body deferred until 100 Continue");
            return Ok(Some(ContinueBody {
                body: request.body,
                framing,
            }));
        }

        write_fragments(Http11RequestIterator::new(head, request.body), sink)?;
        Ok(None)
    }
}

/// The body of a request whose head went out with `Expect: 100-continue`.
///
/// Send it after a `100 Continue` arrives. On a final status instead, drop
/// it (or take the body back with [`ContinueBody::into_body`]).
#[must_use = "the request body is only written by ContinueBody::send"]
pub struct ContinueBody {
    body: RequestBody,
    framing: Option<Framing>,
}

impl ContinueBody {
    /// Framing announced in the already-sent head.
    #[must_use]
    pub fn framing(&self) -> Option<Framing> {
        self.framing
    }

    /// Writes the framed body, exactly as a send without the expectation
    /// would have, and flushes the sink.
    ///
    /// `sink` must be the connection the head went out on; nothing here
    /// ties the two together.
    ///
    /// # Errors
    ///
    /// `SinkWrite`, `SourceRead` or `BodyLengthMismatch`.
    pub fn send<S: ConnectionSink + ?Sized>(self, sink: &mut S) -> RequestSendResult<()> {
        debug!("sending deferred body with framing {:?}", self.framing);
        write_fragments(Http11RequestIterator::body(self.body), sink)
    }

    pub fn into_body(self) -> RequestBody {
        self.body
    }
}

impl core::fmt::Debug for ContinueBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinueBody")
            .field("body", &self.body)
            .field("framing", &self.framing)
            .finish()
    }
}

/// Rendering states of an outgoing request.
///
/// Each variant owns what is left to render; [`Http11RequestIterator`]
/// takes the current state, yields one fragment and stores the next
/// state, so a send can be driven one pull at a time.
pub enum Http11ReqState {
    /// Renders the request line, then moves to `Headers`.
    Intro(RequestHead, Option<RequestBody>),

    /// Renders the header block with its blank line. Moves to `Body` when a
    /// body follows, to `End` for a head-only render.
    Headers(RequestHead, Option<RequestBody>),

    /// Picks the body strategy. Single-buffer bodies are yielded here;
    /// the rest move on to a streaming state.
    Body(RequestBody),

    /// Yields the buffers of a `FixedChunks` body one by one.
    FixedChunks(std::vec::IntoIter<Bytes>),

    /// Pulls a source framed with `Content-Length`, checking every chunk
    /// against the declared length.
    SizedStream {
        declared: u64,
        written: u64,
        source: Box<dyn BodySource>,
    },

    /// Pulls a source through the chunked encoder.
    ChunkedStream(ChunkedEncoder),

    /// Rendering is over; the iterator yields nothing more.
    End,
}

/// Pull-driven rendering of a request into wire fragments.
pub struct Http11RequestIterator(Option<Http11ReqState>);

impl Http11RequestIterator {
    /// Head followed by body.
    #[must_use]
    pub fn new(head: RequestHead, body: RequestBody) -> Self {
        Self(Some(Http11ReqState::Intro(head, Some(body))))
    }

    /// Head only, ending with the blank line.
    #[must_use]
    pub fn head(head: RequestHead) -> Self {
        Self(Some(Http11ReqState::Intro(head, None)))
    }

    /// Framed body only.
    #[must_use]
    pub fn body(body: RequestBody) -> Self {
        Self(Some(Http11ReqState::Body(body)))
    }
}

impl Iterator for Http11RequestIterator {
    type Item = RequestSendResult<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.0.take()? {
            Http11ReqState::Intro(head, body) => {
                let line = head.request_line();
                self.0 = Some(Http11ReqState::Headers(head, body));
                Some(Ok(Bytes::from(line)))
            }
            Http11ReqState::Headers(head, body) => {
                let block = head.header_block();
                self.0 = Some(match body {
                    Some(body) => Http11ReqState::Body(body),
                    None => Http11ReqState::End,
                });
                Some(Ok(block))
            }
            Http11ReqState::Body(body) => match body {
                RequestBody::Empty => {
                    self.0 = Some(Http11ReqState::End);
                    None
                }
                RequestBody::FixedBytes(bytes) => {
                    self.0 = Some(Http11ReqState::End);
                    Some(Ok(bytes))
                }
                RequestBody::FixedChunks(chunks) => {
                    self.0 = Some(Http11ReqState::FixedChunks(chunks.into_iter()));
                    self.next()
                }
                RequestBody::FixedBuilder(declared, builder) => {
                    self.0 = Some(Http11ReqState::End);
                    let bytes = match builder.build() {
                        Ok(bytes) => bytes,
                        Err(err) => return Some(Err(RequestSendError::SourceRead(err))),
                    };
                    let actual = bytes.len() as u64;
                    if actual != declared {
                        warn!("body builder produced {} bytes, declared {}", actual, declared);
                        return Some(Err(RequestSendError::BodyLengthMismatch {
                            declared,
                            actual,
                        }));
                    }
                    Some(Ok(bytes))
                }
                RequestBody::StreamKnownLength(declared, source) => {
                    self.0 = Some(Http11ReqState::SizedStream {
                        declared,
                        written: 0,
                        source,
                    });
                    self.next()
                }
                RequestBody::StreamChunked(source) => {
                    self.0 = Some(Http11ReqState::ChunkedStream(ChunkedEncoder::new(source)));
                    self.next()
                }
            },
            Http11ReqState::FixedChunks(mut chunks) => {
                let chunk = chunks.next()?;
                self.0 = Some(Http11ReqState::FixedChunks(chunks));
                Some(Ok(chunk))
            }
            Http11ReqState::SizedStream {
                declared,
                written,
                mut source,
            } => match source.next_chunk() {
                Ok(Some(chunk)) => {
                    let actual = written + chunk.len() as u64;
                    if actual > declared {
                        warn!("sized body overran its declared {} bytes", declared);
                        self.0 = Some(Http11ReqState::End);
                        return Some(Err(RequestSendError::BodyLengthMismatch {
                            declared,
                            actual,
                        }));
                    }
                    self.0 = Some(Http11ReqState::SizedStream {
                        declared,
                        written: actual,
                        source,
                    });
                    Some(Ok(chunk))
                }
                Ok(None) => {
                    self.0 = Some(Http11ReqState::End);
                    if written == declared {
                        return None;
                    }
                    warn!("sized body ended at {} of {} bytes", written, declared);
                    Some(Err(RequestSendError::BodyLengthMismatch {
                        declared,
                        actual: written,
                    }))
                }
                Err(err) => {
                    self.0 = Some(Http11ReqState::End);
                    Some(Err(RequestSendError::SourceRead(err)))
                }
            },
            Http11ReqState::ChunkedStream(mut encoder) => match encoder.next()? {
                Ok(chunk) => {
                    let ended = chunk == ChunkedData::DataEnded;
                    self.0 = Some(if ended {
                        Http11ReqState::End
                    } else {
                        Http11ReqState::ChunkedStream(encoder)
                    });
                    Some(Ok(chunk.into_bytes()))
                }
                Err(err) => {
                    self.0 = Some(Http11ReqState::End);
                    Some(Err(RequestSendError::SourceRead(err)))
                }
            },
            Http11ReqState::End => None,
        }
    }
}

fn write_fragments<S: ConnectionSink + ?Sized>(
    fragments: Http11RequestIterator,
    sink: &mut S,
) -> RequestSendResult<()> {
    for fragment in fragments {
        let fragment = fragment.inspect_err(|err| error!("request send aborted: {}", err))?;
        if fragment.is_empty() {
            continue;
        }
        sink.write_bytes(&fragment).map_err(|err| {
            error!("sink write failed: {}", err);
            RequestSendError::SinkWrite(err)
        })?;
    }
    sink.flush_bytes().map_err(RequestSendError::SinkWrite)
}

// tchar from RFC 9110 section 5.6.2
fn is_tchar(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&byte)
}

fn is_token(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(is_tchar)
}

fn validate_method(method: &SimpleMethod) -> RequestSendResult<()> {
    if is_token(method.as_str()) {
        Ok(())
    } else {
        Err(RequestSendError::InvalidRequestLine("method"))
    }
}

fn validate_target(target: &str) -> RequestSendResult<()> {
    if memchr::memchr3(b'\r', b'\n', b' ', target.as_bytes()).is_some() {
        return Err(RequestSendError::InvalidRequestLine("target"));
    }
    Ok(())
}

fn validate_header(name: &SimpleHeader, value: &str) -> RequestSendResult<()> {
    let name = name.as_str();
    if !is_token(name) || memchr::memchr2(b'\r', b'\n', value.as_bytes()).is_some() {
        return Err(RequestSendError::InvalidHeader(name.to_string()));
    }
    Ok(())
}
