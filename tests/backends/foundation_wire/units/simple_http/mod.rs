// Unit tree for `foundation_wire::simple_http`.
//
// Every `*_tests.rs` file in this directory needs a `mod` entry here to be
// picked up by the `simple_http` test target.

#![allow(dead_code)]

mod support;

mod body_tests;
mod credentials_tests;
mod redact_tests;
mod request_tests;
