use ::http::Uri;
use bytes::Bytes;

use super::{ParseError, Scan, latin1, take};
use crate::http::{Method, Protocol, RequestLine};

/// Request line parser, `METHOD SP URI SP PROTOCOL CRLF`.
#[derive(Debug, Clone, Copy)]
pub struct RequestLineParser {
    method_len: usize,
    uri_len: usize,
    protocol_len: usize,
}

impl RequestLineParser {
    /// Create parser with the maximum length of each token.
    #[inline]
    pub const fn new(method_len: usize, uri_len: usize, protocol_len: usize) -> Self {
        Self { method_len, uri_len, protocol_len }
    }

    /// Parse request line from the start of `input`.
    ///
    /// Returns pending with `input` untouched if any token is incomplete.
    ///
    /// # Errors
    ///
    /// - [`ParseError::IllegalFormat`] if a token exceeds its bound
    /// - [`ParseError::IllegalHttpMethod`] if method is empty
    /// - [`ParseError::IllegalUri`] if target is not a valid uri
    /// - [`ParseError::IllegalHttpProtocol`] if protocol is not recognized
    pub fn parse(&self, input: &Bytes) -> Result<Scan<RequestLine>, ParseError> {
        let scan = self
            .parse_method(input)?
            .and_then(|method, rest| {
                self.parse_uri(&rest)?.and_then(|uri, rest| {
                    self.parse_protocol(&rest)?
                        .and_then(|protocol, rest| {
                            Ok::<_, ParseError>(Scan::done(RequestLine::new(method, uri, protocol), rest))
                        })
                })
            })?;
        Ok(scan.or_rewind(input))
    }

    fn parse_method(&self, input: &Bytes) -> Result<Scan<Method>, ParseError> {
        take(input, b" ", self.method_len, true)?
            .try_map(|token| Method::from_token(&latin1(&token)))
            .map_err(|_| ParseError::IllegalHttpMethod)
    }

    fn parse_uri(&self, input: &Bytes) -> Result<Scan<Uri>, ParseError> {
        take(input, b" ", self.uri_len, true)?
            .try_map(Uri::from_maybe_shared)
            .map_err(|_| ParseError::IllegalUri)
    }

    fn parse_protocol(&self, input: &Bytes) -> Result<Scan<Protocol>, ParseError> {
        take(input, b"\r\n", self.protocol_len, true)?
            .try_map(|token| Protocol::from_bytes(&token).ok_or(ParseError::IllegalHttpProtocol))
    }
}
