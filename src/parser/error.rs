use crate::http::InvalidHeader;

/// HTTP Parsing error.
///
/// Every kind is fatal to the connection it occurs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Expected `\r\n` or `\n`.
    ExpectingEmptyLine,
    /// Field exceeds its configured bound, or its separator is missing within bound.
    IllegalFormat,
    /// Method token is empty.
    IllegalHttpMethod,
    /// Request target is not a valid URI.
    IllegalUri,
    /// Protocol is neither `HTTP/1.0` nor `HTTP/1.1`.
    IllegalHttpProtocol,
    /// Header name or value is empty.
    IllegalHttpHeader(InvalidHeader),
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ExpectingEmptyLine => f.write_str("expecting empty line"),
            Self::IllegalFormat => f.write_str("illegal format"),
            Self::IllegalHttpMethod => f.write_str("illegal method"),
            Self::IllegalUri => f.write_str("illegal uri"),
            Self::IllegalHttpProtocol => f.write_str("illegal protocol"),
            Self::IllegalHttpHeader(err) => write!(f, "illegal header: {err}"),
        }
    }
}

impl From<InvalidHeader> for ParseError {
    #[inline]
    fn from(value: InvalidHeader) -> Self {
        Self::IllegalHttpHeader(value)
    }
}
