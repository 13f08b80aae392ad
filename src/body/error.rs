use std::{fmt, io};

/// Streaming entity failure, observed by the consumer.
#[derive(Debug)]
pub enum EntityError {
    /// Producer closed before the declared length was received.
    Truncated {
        /// Declared entity length.
        expected: u64,
        /// Bytes received before the entity closed.
        received: u64,
    },
    /// Transport failed while the entity was being received.
    Io(io::Error),
}

impl EntityError {
    /// Returns `true` if this is a [`EntityError::Truncated`].
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

impl std::error::Error for EntityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Truncated { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { expected, received } => {
                write!(f, "entity truncated, received {received} of {expected} bytes")
            }
            Self::Io(err) => write!(f, "entity io error: {err}"),
        }
    }
}

impl From<io::Error> for EntityError {
    #[inline]
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}
