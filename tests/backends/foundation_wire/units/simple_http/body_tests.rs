use super::support::{failing_source, source};
use bytes::Bytes;
use foundation_wire::simple_http::{
    BodySource, ChunkedData, ChunkedEncoder, Framing, ReaderSource, RequestBody,
};
use std::io::{self, Read};

/// WHY: Framing is decided by the variant alone
/// WHAT: Tests every variant's length and framing
#[test]
fn test_content_length_per_variant() {
    assert_eq!(RequestBody::Empty.content_length(), Some(0));
    assert_eq!(RequestBody::bytes("data").content_length(), Some(4));
    assert_eq!(RequestBody::chunks(["ab", "", "cde"]).content_length(), Some(5));
    assert_eq!(
        RequestBody::builder(10, || Bytes::from_static(b"0123456789")).content_length(),
        Some(10)
    );
    assert_eq!(
        RequestBody::stream_with_length(7, source(&[])).framing(),
        Framing::ContentLength(7)
    );
    assert_eq!(RequestBody::stream(source(&[])).framing(), Framing::Chunked);
}

/// WHY: Common payload types convert straight into bodies
/// WHAT: Tests the From conversions
#[test]
fn test_conversions() {
    assert_eq!(RequestBody::from("abc").content_length(), Some(3));
    assert_eq!(RequestBody::from(String::from("abcd")).content_length(), Some(4));
    assert_eq!(RequestBody::from(vec![1u8, 2]).content_length(), Some(2));
    assert_eq!(RequestBody::from(Bytes::from_static(b"x")).content_length(), Some(1));
}

/// WHY: The encoder streams chunk by chunk
/// WHAT: Each pull yields one framed chunk, then a single terminator
#[test]
fn test_encoder_yields_in_pull_order() {
    let encoder = ChunkedEncoder::new(Box::new(source(&["one", "", "three"])));
    let framed: Vec<Bytes> = encoder
        .map(|chunk| chunk.unwrap().into_bytes())
        .collect();
    assert_eq!(
        framed,
        vec![
            Bytes::from_static(b"3\r\none\r\n"),
            Bytes::from_static(b"5\r\nthree\r\n"),
            Bytes::from_static(b"0\r\n\r\n"),
        ]
    );
}

/// WHY: A failed source must not be followed by a terminator
/// WHAT: The error is the last item
#[test]
fn test_encoder_stops_at_source_error() {
    let items: Vec<_> = ChunkedEncoder::new(Box::new(failing_source(&["ok"]))).collect();
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Ok(ChunkedData::Data(_))));
    assert!(items[1].is_err());
}

struct FlakyReader {
    interrupted: bool,
    data: &'static [u8],
}

impl Read for FlakyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// WHY: Interrupted reads are retried, real errors surface
/// WHAT: Tests an interrupted reader and a failing reader
#[test]
fn test_reader_source_errors() {
    let mut source = ReaderSource::new(
        FlakyReader {
            interrupted: false,
            data: b"abc",
        },
        8,
    );
    assert_eq!(source.next_chunk().unwrap(), Some(Bytes::from_static(b"abc")));
    assert_eq!(source.next_chunk().unwrap(), None);

    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }
    let err = ReaderSource::new(Broken, 8).next_chunk().unwrap_err();
    assert!(err.to_string().contains("reset"));
}
