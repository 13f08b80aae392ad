//! HTTP Message Entity.
//!
//! - [`Entity`] the body of a request or response
//! - [`EntityStream`] consumer end of a backpressured streaming entity
//! - [`EntitySender`] producer end of a streaming entity
mod channel;
mod error;

pub use channel::{EntitySender, EntityStream, SendError};
pub use error::EntityError;

use bytes::{Bytes, BytesMut};

/// Default capacity, in chunks, of a streaming entity channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Message body.
///
/// The length is always known up front, streaming entities carry the declared length of the
/// message.
#[derive(Debug, Default)]
pub enum Entity {
    /// No body.
    #[default]
    Empty,
    /// Fully buffered body.
    Strict(Bytes),
    /// Body streamed through a bounded channel, drained exactly once.
    Streaming(EntityStream),
}

impl Entity {
    /// Create an empty entity.
    #[inline]
    pub const fn empty() -> Entity {
        Entity::Empty
    }

    /// Create a fully buffered entity.
    #[inline]
    pub fn strict(bytes: impl Into<Bytes>) -> Entity {
        Entity::Strict(bytes.into())
    }

    /// Create a streaming entity of declared `length`, returning the producer end.
    ///
    /// The producer can run at most `capacity` chunks ahead of the consumer.
    pub fn channel(length: u64, capacity: usize) -> (EntitySender, Entity) {
        let (tx, rx) = channel::channel(length, capacity);
        (tx, Entity::Streaming(rx))
    }

    /// Returns the entity length in bytes.
    pub fn length(&self) -> u64 {
        match self {
            Entity::Empty => 0,
            Entity::Strict(bytes) => bytes.len() as u64,
            Entity::Streaming(stream) => stream.length(),
        }
    }

    /// Returns `true` if this is an [`Entity::Empty`].
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Entity::Empty)
    }

    /// Returns `true` if this is an [`Entity::Streaming`].
    #[inline]
    pub const fn is_streaming(&self) -> bool {
        matches!(self, Entity::Streaming(_))
    }

    /// Buffer the entire entity.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] if a streaming entity is truncated or fails.
    pub async fn collect(self) -> Result<Bytes, EntityError> {
        let mut stream = match self {
            Entity::Empty => return Ok(Bytes::new()),
            Entity::Strict(bytes) => return Ok(bytes),
            Entity::Streaming(stream) => stream,
        };

        // a single chunk is returned without copying
        let mut first = None::<Bytes>;
        let mut buffer = None::<BytesMut>;

        while let Some(chunk) = stream.chunk().await {
            let chunk = chunk?;
            if let Some(buffer) = buffer.as_mut() {
                buffer.extend_from_slice(&chunk);
                continue;
            }
            match first.take() {
                Some(prev) => {
                    let mut b = BytesMut::with_capacity(prev.len() + chunk.len());
                    b.extend_from_slice(&prev);
                    b.extend_from_slice(&chunk);
                    buffer = Some(b);
                }
                None => first = Some(chunk),
            }
        }

        Ok(match (buffer, first) {
            (Some(buffer), _) => buffer.freeze(),
            (None, Some(first)) => first,
            (None, None) => Bytes::new(),
        })
    }
}

impl From<Bytes> for Entity {
    #[inline]
    fn from(value: Bytes) -> Self {
        if value.is_empty() {
            Entity::Empty
        } else {
            Entity::Strict(value)
        }
    }
}

impl From<&'static str> for Entity {
    #[inline]
    fn from(value: &'static str) -> Self {
        Bytes::from_static(value.as_bytes()).into()
    }
}

impl From<Vec<u8>> for Entity {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Bytes::from(value).into()
    }
}
