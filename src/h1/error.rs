use std::{fmt, io};

use crate::body::EntityError;
use crate::parser::ParseError;

/// Error that terminates a connection.
#[derive(Debug)]
pub enum ConnectionError {
    /// Request is malformed.
    Parse(ParseError),
    /// Transport failed.
    Io(io::Error),
    /// Request entity failed, e.g. the peer closed before sending all of it.
    Entity(EntityError),
    /// Frames arrived out of request order.
    UnexpectedFrame,
}

impl ConnectionError {
    /// Returns `true` if this is a [`ConnectionError::Parse`].
    #[inline]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Entity(err) => Some(err),
            Self::UnexpectedFrame => None,
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Entity(err) => write!(f, "entity error: {err}"),
            Self::UnexpectedFrame => f.write_str("unexpected frame"),
        }
    }
}

impl From<ParseError> for ConnectionError {
    #[inline]
    fn from(v: ParseError) -> Self {
        Self::Parse(v)
    }
}

impl From<io::Error> for ConnectionError {
    #[inline]
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}

impl From<EntityError> for ConnectionError {
    #[inline]
    fn from(v: EntityError) -> Self {
        Self::Entity(v)
    }
}
