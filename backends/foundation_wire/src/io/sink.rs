//! Byte sinks the request serializer writes through.
//!
//! WHY: The serializer must stay ignorant of sockets, TLS sessions and
//! buffering so it can be driven deterministically in tests and reused over
//! any transport the connection layer hands it.
//!
//! WHAT: [`ConnectionSink`] is a minimal ordered write capability. Every
//! `write_bytes` call either accepts all of the given bytes or fails; a sink
//! never short-writes silently.
//!
//! HOW: `Vec<u8>` implements the trait directly as a recording sink, and
//! [`IoSink`] adapts any [`std::io::Write`] using `write_all`.

use std::io::{self, Write};

/// Ordered, all-or-nothing byte sink.
pub trait ConnectionSink {
    /// Writes every byte of `bytes` or returns the failure.
    ///
    /// # Errors
    ///
    /// Returns the underlying transport error. Bytes from earlier calls stand.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Pushes buffered bytes to the transport, if the sink buffers at all.
    ///
    /// # Errors
    ///
    /// Returns the underlying transport error.
    fn flush_bytes(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ConnectionSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: ConnectionSink + ?Sized> ConnectionSink for &mut S {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }

    fn flush_bytes(&mut self) -> io::Result<()> {
        (**self).flush_bytes()
    }
}

impl<S: ConnectionSink + ?Sized> ConnectionSink for Box<S> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }

    fn flush_bytes(&mut self) -> io::Result<()> {
        (**self).flush_bytes()
    }
}

/// Adapts a [`std::io::Write`] (a `TcpStream`, a TLS stream, a `BufWriter`)
/// into a [`ConnectionSink`].
#[derive(Debug)]
pub struct IoSink<W: Write> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ConnectionSink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    fn flush_bytes(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
