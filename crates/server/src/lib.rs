//! HTTP endpoint serving interned inline scripts and stylesheets.

pub mod http;

pub use http::{InlineState, preload, router, run_http_server, serve_listener};
