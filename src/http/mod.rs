//! HTTP/1.0 protocol handling.
//!
//! One request is read and answered per connection. Only GET is supported,
//! request headers are read and discarded, and there are no request bodies.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection dispatcher driving the request state machine
//! - **`reader`**: Line-at-a-time reading of the request
//! - **`request`**: The parsed request line
//! - **`response`**: Status codes and response header blocks
//! - **`writer`**: Writes serialized response heads to the client
//! - **`mime`**: Content type detection based on file name suffixes
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitRequestLine │ ── peer closed ──────────────┐
//!        └────────┬─────────┘                              │
//!                 │ GET (any case)    other method → Error │
//!                 ▼                                        │
//!        ┌──────────────────┐                              │
//!        │   AwaitHeaders   │ ← discard until blank line   │
//!        └────────┬─────────┘                              │
//!                 ▼                                        │
//!        ┌──────────────────┐                              │
//!        │     Resolve      │ ← URI → target               │
//!        └────────┬─────────┘                              │
//!                 ▼                                        │
//!        ┌──────────────────┐                              │
//!        │    StatCheck     │ ── 404 / 403 → Error         │
//!        └───┬──────────┬───┘                              │
//!            ▼          ▼                                  │
//!      ServeStatic  ServeDynamic ── failure → Error        │
//!            │          │                                  │
//!            └────┬─────┘                                  │
//!                 ▼                                        │
//!               Done  ◄────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tiny::config::Config;
//! use tiny::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Arc::new(Config::default());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, Arc::clone(&cfg));
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
