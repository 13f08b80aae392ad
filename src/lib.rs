//! HTTP/1 Server Toolkit
//!
//! An incremental HTTP/1.0 and HTTP/1.1 request engine: bytes are framed by a bounded parser,
//! assembled into requests with backpressured streaming entities, handled, and responded to
//! with per message keep-alive decision.
//!
//! - [`parser`] bounded line parsers
//! - [`h1`] framing, assembly, serialization and the connection pipeline
//! - [`service`] request handlers
//! - [`server`] virtual host accept loop
#![warn(missing_debug_implementations)]

mod log;

pub mod http;
pub mod body;
pub mod parser;
pub mod h1;
pub mod config;
pub mod service;
pub mod server;

pub use config::{ParsingConfig, Settings, VHostConfig};
pub use h1::{Connection, ConnectionError};
pub use server::Server;
pub use service::{BoxError, Handler};
