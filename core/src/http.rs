//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP traffic as plain data. The core crate builds
//! `HttpRequest` values and parses `HttpResponse` values without ever
//! touching the network — the caller (host) is responsible for executing the
//! actual I/O. This keeps the core deterministic and easy to test.
//!
//! The consumed API surface is read-only: every request is a GET with no
//! body and no headers beyond the executing client's defaults, so a request
//! is fully described by its URL (query string included).

/// An HTTP request described as plain data.
///
/// Built by `PxClient::build_*` methods. The caller executes this request
/// against the network and returns the corresponding `HttpResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL with the query string already percent-encoded.
    pub url: String,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `PxClient::parse_*` methods for decoding.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// The metadata portion of the response, as handed to decoders.
    pub fn meta(&self) -> ResponseMeta<'_> {
        ResponseMeta {
            status: self.status,
            headers: &self.headers,
        }
    }
}

/// HTTP metadata (everything but the body) available to decoders.
#[derive(Debug, Clone, Copy)]
pub struct ResponseMeta<'a> {
    pub status: u16,
    pub headers: &'a [(String, String)],
}
