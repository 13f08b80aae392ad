use bytes::Bytes;
use futures_core::Stream;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::sync::mpsc;

use super::EntityError;

type Item = Result<Bytes, EntityError>;

pub(super) fn channel(length: u64, capacity: usize) -> (EntitySender, EntityStream) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        EntitySender { tx },
        EntityStream {
            rx,
            length,
            remaining: length,
            done: false,
        },
    )
}

// ===== Sender =====

/// Producer end of a streaming entity.
///
/// Dropping the sender closes the entity, if fewer bytes than the declared length were sent,
/// the consumer observes [`EntityError::Truncated`].
#[derive(Debug)]
pub struct EntitySender {
    tx: mpsc::Sender<Item>,
}

impl EntitySender {
    /// Push a chunk, waiting while the channel is full.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] if the consumer end is dropped.
    pub async fn send(&self, chunk: Bytes) -> Result<(), SendError> {
        self.tx.send(Ok(chunk)).await.map_err(|_| SendError)
    }

    /// Fail the entity with `err` and close it.
    ///
    /// If the channel is full, the error is dropped and the consumer observes truncation
    /// instead.
    pub fn abort(self, err: EntityError) {
        let _ = self.tx.try_send(Err(err));
    }

    /// Returns `true` if the consumer end is dropped.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ===== Stream =====

/// Consumer end of a streaming entity.
///
/// Implements [`Stream`], yielding chunks until the declared length is received.
pub struct EntityStream {
    rx: mpsc::Receiver<Item>,
    length: u64,
    remaining: u64,
    done: bool,
}

impl EntityStream {
    /// Returns the declared entity length.
    #[inline]
    pub const fn length(&self) -> u64 {
        self.length
    }

    /// Returns the number of bytes not yet received.
    #[inline]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Receive the next chunk.
    ///
    /// Returns `None` after the entity is fully received or failed.
    pub fn chunk(&mut self) -> impl Future<Output = Option<Item>> + '_ {
        std::future::poll_fn(|cx| self.poll_chunk(cx))
    }

    /// Tries to receive the next chunk.
    pub fn poll_chunk(&mut self, cx: &mut Context) -> Poll<Option<Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        match ready!(self.rx.poll_recv(cx)) {
            Some(Ok(chunk)) => {
                self.remaining = self.remaining.saturating_sub(chunk.len() as u64);
                Poll::Ready(Some(Ok(chunk)))
            }
            Some(Err(err)) => {
                self.done = true;
                self.rx.close();
                Poll::Ready(Some(Err(err)))
            }
            None => {
                self.done = true;
                if self.remaining == 0 {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Err(EntityError::Truncated {
                        expected: self.length,
                        received: self.length - self.remaining,
                    })))
                }
            }
        }
    }
}

impl Stream for EntityStream {
    type Item = Item;

    #[inline]
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_chunk(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

impl fmt::Debug for EntityStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStream")
            .field("length", &self.length)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

// ===== Error =====

/// Consumer end of the entity is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendError;

impl std::error::Error for SendError { }

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("entity receiver dropped")
    }
}
