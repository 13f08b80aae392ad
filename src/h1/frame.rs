use bytes::Bytes;

use crate::http::{RawHeader, RequestLine};

/// A single structural fragment of a request.
///
/// A request is framed as one [`Frame::RequestLine`], one or more [`Frame::Header`], then
/// either [`Frame::EntityEnd`] alone, or [`Frame::EntityStart`] followed by chunks and
/// [`Frame::EntityEnd`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    RequestLine(RequestLine),
    Header(RawHeader),
    /// Start of an entity with the declared length, always non zero.
    EntityStart(u64),
    EntityChunk(Bytes),
    /// End of the request.
    EntityEnd,
}

impl Frame {
    /// Returns `true` if this frame terminates a request.
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self, Frame::EntityEnd)
    }
}
