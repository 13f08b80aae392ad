//! HTTP/1 Protocol.
//!
//! - [`Frame`] structural fragments of a request
//! - [`FramingState`] the state machine turning chunked bytes into [`Frame`]s
//! - [`FrameReader`] drives [`FramingState`] over an async byte source
//! - [`RequestAssembler`] folds frames into a [`Request`][crate::http::Request]
//! - [`should_close`] keep-alive decision
//! - [`encode_head`] and [`write_response`] response serialization
//! - [`Connection`] the integration of all the components above into single API
mod frame;
mod state;
mod reader;
mod assemble;
mod policy;
mod encode;
mod error;
mod connection;

pub use frame::Frame;
pub use state::FramingState;
pub use reader::FrameReader;
pub use assemble::RequestAssembler;
pub use policy::{request_should_close, should_close};
pub use encode::{encode_head, write_response};
pub use error::ConnectionError;
pub use connection::Connection;

#[cfg(test)]
mod test;
