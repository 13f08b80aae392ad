use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::ConnectionError;
use crate::body::Entity;
use crate::http::{Protocol, RawHeader, Response, StatusCode};

/// Write the status line, headers and the empty line.
///
/// Headers are written as `name:value`, in list order.
pub fn encode_head(protocol: Protocol, status: &StatusCode, headers: &[RawHeader], buf: &mut BytesMut) {
    buf.reserve(64 + headers.len() * 32);

    buf.extend_from_slice(protocol.as_str().as_bytes());
    buf.extend_from_slice(b" ");
    buf.extend_from_slice(itoa::Buffer::new().format(status.value()).as_bytes());
    buf.extend_from_slice(b" ");
    buf.extend_from_slice(status.name().as_bytes());
    buf.extend_from_slice(b"\r\n");

    for header in headers {
        buf.extend_from_slice(header.name().as_bytes());
        buf.extend_from_slice(b":");
        buf.extend_from_slice(header.value().as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
}

/// Write `response` to `io`.
///
/// A strict entity is written in one piece with the head. A streaming entity is written chunk by
/// chunk as it is received, it is never fully buffered.
///
/// # Errors
///
/// Returns [`ConnectionError::Io`] if writing fails, or [`ConnectionError::Entity`] if a
/// streaming entity fails midway.
pub async fn write_response<W>(
    io: &mut W,
    protocol: Protocol,
    response: Response,
    buf: &mut BytesMut,
) -> Result<(), ConnectionError>
where
    W: AsyncWrite + Unpin,
{
    let (status, headers, entity) = response.into_parts();
    encode_head(protocol, &status, &headers, buf);

    match entity {
        Entity::Empty => io.write_all_buf(buf).await?,
        Entity::Strict(bytes) => {
            buf.extend_from_slice(&bytes);
            io.write_all_buf(buf).await?;
        }
        Entity::Streaming(mut stream) => {
            io.write_all_buf(buf).await?;
            while let Some(chunk) = stream.chunk().await {
                io.write_all(&chunk?).await?;
            }
        }
    }

    buf.clear();
    io.flush().await?;
    Ok(())
}
