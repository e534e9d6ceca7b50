//! Sinks and pull-sources shared by the unit tests.

use bytes::Bytes;
use foundation_wire::extensions::result_ext::BoxedError;
use foundation_wire::io::ConnectionSink;
use foundation_wire::simple_http::{BodySource, IterSource};
use std::io;

/// Sink that records writes and flushes separately so tests can see where
/// the serializer flushed.
#[derive(Default)]
pub struct RecordingSink {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
}

impl RecordingSink {
    pub fn bytes(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl ConnectionSink for RecordingSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    fn flush_bytes(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Sink accepting `allowed` writes and failing every one after.
pub struct FailingSink {
    pub allowed: usize,
    pub accepted: Vec<u8>,
}

impl FailingSink {
    pub fn after(allowed: usize) -> Self {
        Self {
            allowed,
            accepted: Vec::new(),
        }
    }
}

impl ConnectionSink for FailingSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.allowed == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        self.allowed -= 1;
        self.accepted.extend_from_slice(bytes);
        Ok(())
    }
}

/// Pull-source over static chunks.
pub fn source(chunks: &[&'static str]) -> IterSource<std::vec::IntoIter<Result<Bytes, BoxedError>>> {
    let items: Vec<Result<Bytes, BoxedError>> = chunks
        .iter()
        .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
        .collect();
    IterSource::new(items.into_iter())
}

/// Pull-source yielding `chunks` and then failing.
pub fn failing_source(
    chunks: &[&'static str],
) -> IterSource<std::vec::IntoIter<Result<Bytes, BoxedError>>> {
    let mut items: Vec<Result<Bytes, BoxedError>> = chunks
        .iter()
        .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
        .collect();
    items.push(Err("upstream reset".into()));
    IterSource::new(items.into_iter())
}

/// Source that counts its pulls, to prove a deferred body was not touched.
pub struct CountingSource {
    pub inner: Box<dyn BodySource>,
    pub pulls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

impl BodySource for CountingSource {
    fn next_chunk(&mut self) -> Result<Option<Bytes>, BoxedError> {
        self.pulls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.inner.next_chunk()
    }
}
