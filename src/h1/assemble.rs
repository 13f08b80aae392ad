use super::{ConnectionError, Frame};
use crate::body::{Entity, EntityError, EntitySender};
use crate::http::{RawHeader, Request, RequestLine};
use crate::log::trace;

/// Folds the [`Frame`]s of a single request into a [`Request`].
///
/// The request is released as soon as its head is complete: with an empty entity on
/// [`Frame::EntityEnd`], or with a streaming entity on [`Frame::EntityStart`]. In the latter
/// case, the following chunks are pushed into the entity channel, waiting while it is full.
///
/// One assembler handles exactly one request, dropping it before the entity is complete
/// closes the entity as truncated.
#[derive(Debug)]
pub struct RequestAssembler {
    capacity: usize,
    line: Option<RequestLine>,
    headers: Vec<RawHeader>,
    entity: Option<Streaming>,
    done: bool,
}

#[derive(Debug)]
struct Streaming {
    /// `None` after the consumer dropped the entity.
    sender: Option<EntitySender>,
    expected: u64,
    received: u64,
}

impl RequestAssembler {
    /// Create assembler whose streaming entity buffers at most `capacity` chunks.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            line: None,
            headers: Vec::with_capacity(8),
            entity: None,
            done: false,
        }
    }

    /// Returns `true` after [`Frame::EntityEnd`] is pushed.
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns `true` if the request is released and its entity is still being received.
    #[inline]
    pub const fn is_streaming(&self) -> bool {
        self.entity.is_some() && !self.done
    }

    /// Push the next frame, returns the request once its head is complete.
    ///
    /// Chunks for an entity whose consumer is gone are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnexpectedFrame`] if frames are out of order.
    pub async fn push(&mut self, frame: Frame) -> Result<Option<Request>, ConnectionError> {
        if self.done {
            return Err(ConnectionError::UnexpectedFrame);
        }

        match frame {
            Frame::RequestLine(line) => {
                if self.entity.is_some() || self.line.replace(line).is_some() {
                    return Err(ConnectionError::UnexpectedFrame);
                }
                Ok(None)
            }
            Frame::Header(header) => {
                if self.line.is_none() || self.entity.is_some() {
                    return Err(ConnectionError::UnexpectedFrame);
                }
                self.headers.push(header);
                Ok(None)
            }
            Frame::EntityStart(len) => {
                if self.entity.is_some() {
                    return Err(ConnectionError::UnexpectedFrame);
                }
                let (sender, entity) = Entity::channel(len, self.capacity);
                self.entity = Some(Streaming {
                    sender: Some(sender),
                    expected: len,
                    received: 0,
                });
                self.release(entity).map(Some)
            }
            Frame::EntityChunk(chunk) => {
                let Some(streaming) = &mut self.entity else {
                    return Err(ConnectionError::UnexpectedFrame);
                };
                streaming.received += chunk.len() as u64;
                let closed = match &streaming.sender {
                    Some(sender) => sender.send(chunk).await.is_err(),
                    None => false,
                };
                if closed {
                    trace!("entity dropped by consumer, discarding the rest");
                    streaming.sender = None;
                }
                Ok(None)
            }
            Frame::EntityEnd => {
                self.done = true;
                match self.entity.take() {
                    // dropping the sender completes the entity
                    Some(_) => Ok(None),
                    None => self.release(Entity::Empty).map(Some),
                }
            }
        }
    }

    /// Returns the error observed by the consumer if the entity is cut short now.
    pub fn truncated(&self) -> Option<EntityError> {
        match &self.entity {
            Some(streaming) if !self.done => Some(EntityError::Truncated {
                expected: streaming.expected,
                received: streaming.received,
            }),
            _ => None,
        }
    }

    /// Fail the streaming entity with `err`, the consumer observes it instead of truncation.
    ///
    /// Does nothing if no entity is streaming or its consumer is gone.
    pub fn abort(&mut self, err: EntityError) {
        if self.done {
            return;
        }
        if let Some(sender) = self.entity.as_mut().and_then(|s| s.sender.take()) {
            sender.abort(err);
        }
    }

    fn release(&mut self, entity: Entity) -> Result<Request, ConnectionError> {
        let line = self.line.take().ok_or(ConnectionError::UnexpectedFrame)?;
        Ok(Request::new(line, std::mem::take(&mut self.headers), entity))
    }
}
