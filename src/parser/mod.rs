//! HTTP/1 Line Parsers.
//!
//! Every parser works on chunked bytes: given any prefix of a message, it either produces a value
//! and the bytes after it, or returns a pending [`Scan`] holding the untouched input, where more
//! bytes are required to complete parsing.
//!
//! Every token is searched with [`take`], which never looks further than the configured bound of
//! that token, so a peer cannot make the parser buffer or scan an unbounded field.
//!
//! - [`RequestLineParser`] parses `METHOD SP URI SP PROTOCOL CRLF`
//! - [`HeaderParser`] parses `NAME ":" VALUE CRLF`
//! - [`EmptyLineParser`] consumes the empty line terminating the header section
mod scan;
mod error;
mod request;
mod header;

pub use scan::{Scan, take};
pub use error::ParseError;
pub use request::RequestLineParser;
pub use header::{HeaderParser, EmptyLineParser};

/// Decode bytes one char per byte.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
