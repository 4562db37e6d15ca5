//! Network transports for the link resolver.
//!
//! The HTTP server is only compiled with the `http-server` feature.

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(feature = "http-server")]
pub use http::{router, serve_http};
