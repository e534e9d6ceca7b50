//! Outgoing HTTP/1.1 requests: building them, writing them to a sink and
//! rendering them safely for logs.

mod auth;
mod body;
mod chunked;
mod config;
mod errors;
mod headers;
mod redact;
mod render;
mod request;

pub mod url;

pub use auth::*;
pub use body::*;
pub use chunked::*;
pub use config::*;
pub use errors::*;
pub use headers::*;
pub use redact::*;
pub use render::*;
pub use request::*;
