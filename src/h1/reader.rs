use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{ConnectionError, Frame, FramingState};
use crate::config::ParsingConfig;
use crate::parser::ParseError;
use crate::log::debug;

const DEFAULT_BUFFER_CAP: usize = 8 * 1024;
const MIN_READ_CAP: usize = 512;

/// Pull [`Frame`]s out of a byte source.
///
/// Bytes are read only when the current state cannot produce a frame, so the source is never
/// pulled ahead of the frame consumer.
#[derive(Debug)]
pub struct FrameReader<R> {
    io: R,
    state: Option<FramingState>,
    /// Failure of the state following the last returned frame.
    error: Option<ParseError>,
    read_buffer: BytesMut,
}

impl<R> FrameReader<R> {
    pub fn new(io: R, config: ParsingConfig) -> Self {
        Self {
            io,
            state: Some(FramingState::new(config)),
            error: None,
            read_buffer: BytesMut::new(),
        }
    }

    /// Returns `true` if the reader stopped, after end of input or an error.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state.is_none() && self.error.is_none()
    }

    /// Returns the underlying byte source.
    pub fn into_inner(self) -> R {
        self.io
    }
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Returns the next frame.
    ///
    /// Returns `None` once the source reaches end of input. Bytes of an incomplete message
    /// still buffered at that point are discarded.
    ///
    /// # Errors
    ///
    /// Parse or io error terminates the reader, subsequent calls return `None`. Frames complete
    /// before a malformed part of the input are returned first.
    pub async fn next_frame(&mut self) -> Result<Option<Frame>, ConnectionError> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }

        loop {
            let Some(state) = self.state.take() else {
                return Ok(None);
            };

            if let Some(frame) = state.frame().cloned() {
                match state.next(Bytes::new()) {
                    Ok(next) => self.state = Some(next),
                    Err(err) => self.error = Some(err),
                }
                return Ok(Some(frame));
            }

            if self.read_buffer.capacity() < MIN_READ_CAP {
                self.read_buffer.reserve(DEFAULT_BUFFER_CAP);
            }

            if self.io.read_buf(&mut self.read_buffer).await? == 0 {
                if state.has_bytes() {
                    debug!("end of input with {} unparsed bytes", state.remaining().len());
                }
                return Ok(None);
            }

            let bytes = self.read_buffer.split().freeze();
            self.state = Some(state.next(bytes)?);
        }
    }
}
