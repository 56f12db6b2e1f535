//! Tiny - iterative HTTP/1.0 server
//!
//! Serves files from a document root and runs CGI-style programs, one
//! connection at a time.

pub mod config;
pub mod content;
pub mod http;
pub mod server;
