//! Header fields.
//!
//! Headers are kept as an ordered list of [`RawHeader`], lookups are done by linear scan with
//! case insensitive name comparison.
use std::fmt;

/// `Content-Length` header name.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// `Connection` header name.
pub const CONNECTION: &str = "Connection";

/// `text/plain` media type.
pub const TEXT_PLAIN: &str = "text/plain";

/// `application/octet-stream` media type.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// A single header field, name and value.
///
/// Both name and value are trimmed and never empty.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawHeader {
    name: Box<str>,
    value: Box<str>,
}

impl RawHeader {
    /// Create new header field.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeader`] if either name or value is empty after trimming.
    pub fn new(name: &str, value: &str) -> Result<RawHeader, InvalidHeader> {
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(InvalidHeader::EmptyName);
        }
        if value.is_empty() {
            return Err(InvalidHeader::EmptyValue);
        }
        Ok(Self {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Create a `Content-Length` header.
    pub fn content_length(len: u64) -> RawHeader {
        Self {
            name: CONTENT_LENGTH.into(),
            value: itoa::Buffer::new().format(len).into(),
        }
    }

    /// Create a `Content-Type` header.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeader`] if the media type is empty after trimming.
    pub fn content_type(media_type: &str) -> Result<RawHeader, InvalidHeader> {
        Self::new(CONTENT_TYPE, media_type)
    }

    /// Returns the header name as received.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the header value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if header name is equal to `name`, ignoring ASCII case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Debug for RawHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.name, self.value)
    }
}

// ===== Lookup =====

/// Returns the first header with given name, ignoring ASCII case.
pub fn get<'a>(headers: &'a [RawHeader], name: &str) -> Option<&'a RawHeader> {
    headers.iter().find(|h| h.is(name))
}

/// Returns the first valid `Content-Length` value.
///
/// Headers whose value is not an integer, or is negative, are skipped as if absent.
pub fn content_length(headers: &[RawHeader]) -> Option<u64> {
    headers
        .iter()
        .filter(|h| h.is(CONTENT_LENGTH))
        .find_map(|h| h.value().parse::<i64>().ok().and_then(|n| u64::try_from(n).ok()))
}

/// Recognized `Connection` options.
///
/// Other tokens are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    close: bool,
    keep_alive: bool,
    upgrade: bool,
}

impl ConnectionOptions {
    /// Parse comma separated `Connection` tokens, ignoring ASCII case.
    ///
    /// Returns `None` if no recognized token is present.
    pub fn parse(value: &str) -> Option<ConnectionOptions> {
        let mut options = ConnectionOptions::default();
        let mut any = false;
        for token in value.split(',').map(str::trim) {
            if token.eq_ignore_ascii_case("close") {
                options.close = true;
            } else if token.eq_ignore_ascii_case("keep-alive") {
                options.keep_alive = true;
            } else if token.eq_ignore_ascii_case("upgrade") {
                options.upgrade = true;
            } else {
                continue;
            }
            any = true;
        }
        any.then_some(options)
    }

    /// Find the first `Connection` header with at least one recognized token.
    pub fn from_headers(headers: &[RawHeader]) -> Option<ConnectionOptions> {
        headers
            .iter()
            .filter(|h| h.is(CONNECTION))
            .find_map(|h| Self::parse(h.value()))
    }

    /// Contains `close`.
    #[inline]
    pub const fn has_close(&self) -> bool {
        self.close
    }

    /// Contains `keep-alive`.
    #[inline]
    pub const fn has_keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// Contains `upgrade`.
    #[inline]
    pub const fn has_upgrade(&self) -> bool {
        self.upgrade
    }
}

// ===== Error =====

/// Error when constructing [`RawHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHeader {
    /// Header name is empty or whitespace only.
    EmptyName,
    /// Header value is empty or whitespace only.
    EmptyValue,
}

impl std::error::Error for InvalidHeader { }

impl fmt::Display for InvalidHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("header name cannot be empty"),
            Self::EmptyValue => f.write_str("header value cannot be empty"),
        }
    }
}
