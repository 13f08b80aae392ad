use bytes::BytesMut;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::{ConnectionError, FrameReader, RequestAssembler, encode, policy};
use crate::body::{DEFAULT_CHANNEL_CAPACITY, EntityError};
use crate::config::ParsingConfig;
use crate::http::{Request, Response, StatusCode};
use crate::log::{debug, error, warning};
use crate::service::Handler;

const DEFAULT_BUFFER_CAP: usize = 1024;

/// HTTP/1 connection.
///
/// Requests are served one at a time: read, handled, responded, then the connection either
/// closes or waits for the next request.
///
/// While a request entity is streamed to the handler, reading the next frames and handling the
/// request run concurrently, and the transport is not read while the entity channel is full.
#[derive(Debug)]
pub struct Connection<IO, H> {
    io: IO,
    handler: Arc<H>,
    config: ParsingConfig,
    entity_buffer: usize,
}

impl<IO, H> Connection<IO, H>
where
    IO: AsyncRead + AsyncWrite,
    H: Handler,
{
    pub fn new(io: IO, handler: Arc<H>, config: ParsingConfig) -> Self {
        Self {
            io,
            handler,
            config,
            entity_buffer: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Set the capacity, in chunks, of streaming request entities.
    pub fn with_entity_buffer(mut self, entity_buffer: usize) -> Self {
        self.entity_buffer = entity_buffer;
        self
    }

    /// Serve requests until the peer closes, or a response requires closing.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] on malformed request, transport failure, or when the peer
    /// closes in the middle of a request entity.
    pub async fn serve(self) -> Result<(), ConnectionError> {
        let result = self.try_serve().await;
        match &result {
            Err(err) if err.is_parse() => {
                warning!("malformed request, closing connection: {err}");
            }
            Err(ConnectionError::Entity(err)) => {
                warning!("request entity failed, closing connection: {err}");
            }
            _ => {}
        }
        result
    }

    async fn try_serve(self) -> Result<(), ConnectionError> {
        let Self { io, handler, config, entity_buffer } = self;
        let (read, mut write) = tokio::io::split(io);
        let mut reader = FrameReader::new(read, config);
        let mut write_buffer = BytesMut::with_capacity(DEFAULT_BUFFER_CAP);

        loop {
            let mut assembler = RequestAssembler::new(entity_buffer);

            let request = loop {
                match reader.next_frame().await? {
                    Some(frame) => {
                        if let Some(request) = assembler.push(frame).await? {
                            break request;
                        }
                    }
                    None => return Ok(()),
                }
            };

            let close = policy::request_should_close(&request);
            let protocol = request.protocol();

            let respond = async {
                let response = call(&*handler, request).await;
                encode::write_response(&mut write, protocol, response, &mut write_buffer).await
            };

            if assembler.is_done() {
                respond.await?;
            } else {
                let (read, written) = tokio::join!(read_entity(&mut reader, assembler), respond);
                read?;
                written?;
            }

            debug!("request served, keep alive: {}", !close);

            if close {
                write.shutdown().await?;
                return Ok(());
            }
        }
    }
}

/// Push the remaining entity frames of a request.
///
/// The assembler is dropped on return, so on failure the entity consumer observes
/// truncation instead of waiting for more chunks, or the transport error if reading failed.
async fn read_entity<R>(
    reader: &mut FrameReader<R>,
    mut assembler: RequestAssembler,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
{
    while !assembler.is_done() {
        let frame = match reader.next_frame().await {
            Ok(frame) => frame,
            Err(ConnectionError::Io(err)) => {
                assembler.abort(EntityError::Io(err.kind().into()));
                return Err(ConnectionError::Io(err));
            }
            Err(err) => return Err(err),
        };
        match frame {
            Some(frame) => {
                assembler.push(frame).await?;
            }
            None => {
                return Err(match assembler.truncated() {
                    Some(err) => ConnectionError::Entity(err),
                    None => ConnectionError::UnexpectedFrame,
                });
            }
        }
    }
    Ok(())
}

/// Apply the handler, unmatched request is responded with `404 Not Found`, and handler failure
/// with `500 Internal Server Error`.
async fn call<H: Handler + ?Sized>(handler: &H, request: Request) -> Response {
    if !handler.matches(&request) {
        return Response::new(StatusCode::NOT_FOUND);
    }
    match handler.apply(request).await {
        Ok(response) => response,
        Err(err) => {
            error!("handler failed: {err}");
            Response::new(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
