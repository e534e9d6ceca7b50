//! HTTP/1.1 request serialization for the ewe-platform wire layer.
//!
//! The crate turns a [`simple_http::SimpleRequest`] into exact HTTP/1.1 wire
//! bytes written through an injectable [`io::ConnectionSink`], including
//! chunked framing and the two-phase `Expect: 100-continue` send. It also
//! extracts Basic-Auth credentials from URIs and renders requests for logs
//! with credential-bearing headers masked.
//!
//! Transport establishment, TLS, DNS, response parsing and connection reuse
//! live elsewhere; this crate only writes bytes to a sink it is handed.

#[macro_use]
pub mod logs;

pub mod extensions;
pub mod io;
pub mod simple_http;
