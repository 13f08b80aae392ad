use bytes::Bytes;

use super::{ParseError, Scan, latin1, take};
use crate::http::RawHeader;

/// Header field parser, `NAME ":" VALUE CRLF`.
#[derive(Debug, Clone, Copy)]
pub struct HeaderParser {
    name_len: usize,
    value_len: usize,
}

impl HeaderParser {
    /// Create parser with the maximum length of name and value.
    #[inline]
    pub const fn new(name_len: usize, value_len: usize) -> Self {
        Self { name_len, value_len }
    }

    /// Parse a header field from the start of `input`, name and value are trimmed.
    ///
    /// Returns pending with `input` untouched if the line is incomplete.
    ///
    /// # Errors
    ///
    /// - [`ParseError::IllegalFormat`] if name or value exceeds its bound
    /// - [`ParseError::IllegalHttpHeader`] if name or value is empty
    pub fn parse(&self, input: &Bytes) -> Result<Scan<RawHeader>, ParseError> {
        let scan = take(input, b":", self.name_len, true)?.and_then(|name, rest| {
            take(&rest, b"\r\n", self.value_len, true)?
                .try_map(|value| RawHeader::new(&latin1(&name), &latin1(&value)))
                .map_err(ParseError::from)
        })?;
        Ok(scan.or_rewind(input))
    }
}

/// Empty line parser, consumes a leading `\r\n` or `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLineParser;

impl EmptyLineParser {
    /// Consume the empty line at the start of `input`.
    ///
    /// Returns pending on empty input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectingEmptyLine`] if `input` starts with anything else.
    pub fn parse(&self, input: &Bytes) -> Result<Scan<()>, ParseError> {
        match input.as_ref() {
            [b'\r', b'\n', ..] => Ok(Scan::done((), input.slice(2..))),
            [b'\n', ..] => Ok(Scan::done((), input.slice(1..))),
            [] => Ok(Scan::pending(input.clone())),
            _ => Err(ParseError::ExpectingEmptyLine),
        }
    }
}
