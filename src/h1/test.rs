use bytes::{Bytes, BytesMut};
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};

use super::*;
use crate::body::{Entity, EntityError};
use crate::config::ParsingConfig;
use crate::http::header::{APPLICATION_OCTET_STREAM, TEXT_PLAIN};
use crate::http::{Method, Protocol, RawHeader, Request, RequestLine, Response, StatusCode, Uri};
use crate::parser::ParseError;
use crate::service::{BoxError, Composite, Handler, Ping, from_fn};

const SCENARIO: &[u8] = b"GET / HTTP/1.0\r\nContent-Length:2\r\nname:value\r\n\r\nabcd";

fn scenario_config() -> ParsingConfig {
    ParsingConfig::new(20, 10, 10, 10, 10)
}

fn header(name: &str, value: &str) -> Frame {
    Frame::Header(RawHeader::new(name, value).unwrap())
}

fn reqline(method: Method, uri: &'static str, protocol: Protocol) -> Frame {
    Frame::RequestLine(RequestLine::new(method, Uri::from_static(uri), protocol))
}

/// Drive the state machine over `chunks`, returns the frames and the unconsumed bytes.
fn drive<'a>(
    config: ParsingConfig,
    chunks: impl IntoIterator<Item = &'a [u8]>,
) -> Result<(Vec<Frame>, Bytes), ParseError> {
    let mut state = FramingState::new(config);
    let mut chunks = chunks.into_iter();
    let mut frames = vec![];

    loop {
        if let Some(frame) = state.frame() {
            frames.push(frame.clone());
            state = state.next(Bytes::new())?;
            continue;
        }
        match chunks.next() {
            Some(chunk) => state = state.next(Bytes::copy_from_slice(chunk))?,
            None => return Ok((frames, state.remaining().clone())),
        }
    }
}

/// Merge consecutive entity chunks, their boundaries follow the input chunking.
fn merge_chunks(frames: Vec<Frame>) -> Vec<Frame> {
    let mut merged: Vec<Frame> = vec![];
    for frame in frames {
        match (merged.last_mut(), frame) {
            (Some(Frame::EntityChunk(prev)), Frame::EntityChunk(chunk)) => {
                let mut buf = BytesMut::from(&prev[..]);
                buf.extend_from_slice(&chunk);
                *prev = buf.freeze();
            }
            (_, frame) => merged.push(frame),
        }
    }
    merged
}

// ===== Framing =====

#[test]
fn test_framing_scenario() {
    let (frames, remaining) = drive(scenario_config(), [SCENARIO]).unwrap();

    assert_eq!(
        frames,
        [
            reqline(Method::GET, "/", Protocol::HTTP_10),
            header("Content-Length", "2"),
            header("name", "value"),
            Frame::EntityStart(2),
            Frame::EntityChunk(Bytes::from_static(b"ab")),
            Frame::EntityEnd,
        ]
    );
    assert_eq!(remaining, &b"cd"[..]);
}

#[test]
fn test_chunk_boundary_invariance() {
    let (expected, expected_remaining) = drive(scenario_config(), [SCENARIO]).unwrap();

    for at in 0..=SCENARIO.len() {
        let (head, tail) = SCENARIO.split_at(at);
        let (frames, remaining) = drive(scenario_config(), [head, tail]).unwrap();
        assert_eq!(merge_chunks(frames), expected, "split at {at}");
        assert_eq!(remaining, expected_remaining, "split at {at}");
    }

    let (frames, remaining) = drive(scenario_config(), SCENARIO.chunks(1)).unwrap();
    assert_eq!(merge_chunks(frames), expected);
    assert_eq!(remaining, expected_remaining);

    let (frames, _) = drive(scenario_config(), SCENARIO.chunks(3)).unwrap();
    assert_eq!(merge_chunks(frames), expected);
}

#[test]
fn test_framing_states() {
    let config = ParsingConfig::default();

    // nothing is produced until the request line is complete
    let state = FramingState::new(config).next(Bytes::from_static(b"GET / HT")).unwrap();
    assert!(state.frame().is_none());
    assert!(state.has_bytes());

    let state = state.next(Bytes::from_static(b"TP/1.1\r\nHost")).unwrap();
    assert_eq!(state.frame(), Some(&reqline(Method::GET, "/", Protocol::HTTP_11)));

    let state = state.next(Bytes::new()).unwrap();
    assert!(state.frame().is_none());
    assert_eq!(state.remaining(), &b"Host"[..]);

    let state = state.next(Bytes::from_static(b":a\r\n\r")).unwrap();
    assert_eq!(state.frame(), Some(&header("Host", "a")));

    // a lone `\r` may still be the empty line
    let state = state.next(Bytes::new()).unwrap();
    assert!(state.frame().is_none());

    let state = state.next(Bytes::from_static(b"\nGET")).unwrap();
    assert_eq!(state.frame(), Some(&Frame::EntityEnd));

    let state = state.next(Bytes::new()).unwrap();
    assert!(state.frame().is_none());
    assert_eq!(state.remaining(), &b"GET"[..]);
}

#[test]
fn test_entity_chunks() {
    let input = b"POST / HTTP/1.1\r\nContent-Length:5\r\n\r\nhe";
    let (frames, remaining) = drive(ParsingConfig::default(), [&input[..], &b"llo"[..], &b"next"[..]]).unwrap();

    assert_eq!(
        &frames[2..],
        [
            Frame::EntityStart(5),
            Frame::EntityChunk(Bytes::from_static(b"he")),
            Frame::EntityChunk(Bytes::from_static(b"llo")),
            Frame::EntityEnd,
        ]
    );
    assert_eq!(remaining, &b"next"[..]);
}

#[test]
fn test_entity_gating() {
    macro_rules! test {
        ($input:literal => $($frame:expr),*) => {
            let (frames, _) = drive(ParsingConfig::default(), [&$input[..]]).unwrap();
            assert_eq!(&frames[1..], [$($frame),*]);
        };
    }

    test!(b"GET / HTTP/1.1\r\nHost:a\r\n\r\n" => header("Host", "a"), Frame::EntityEnd);
    test!(b"GET / HTTP/1.1\r\nContent-Length:0\r\n\r\n" => header("Content-Length", "0"), Frame::EntityEnd);
    test!(b"GET / HTTP/1.1\r\nContent-Length:-5\r\n\r\n" => header("Content-Length", "-5"), Frame::EntityEnd);
    test!(b"GET / HTTP/1.1\r\nContent-Length:abc\r\n\r\n" => header("Content-Length", "abc"), Frame::EntityEnd);
    // first valid value wins
    test!(
        b"GET / HTTP/1.1\r\ncontent-length:x\r\ncontent-length:1\r\nContent-Length:2\r\n\r\nab" =>
        header("content-length", "x"),
        header("content-length", "1"),
        header("Content-Length", "2"),
        Frame::EntityStart(1),
        Frame::EntityChunk(Bytes::from_static(b"a")),
        Frame::EntityEnd
    );
}

#[test]
fn test_framing_bounds() {
    macro_rules! test {
        ($input:literal, $err:expr) => {
            let config = ParsingConfig::new(4, 4, 3, 3, 8);
            assert_eq!(drive(config, [&$input[..]]).map(|_| ()), Err($err));
        };
    }

    test!(b"POST / HTTP/1.1\r\n", ParseError::IllegalFormat);
    test!(b"GET /abc HTTP/1.1\r\n", ParseError::IllegalFormat);
    test!(b"GET / HTTP/1.1x\r\n", ParseError::IllegalFormat);
    test!(b"GET / HTTP/1.1\r\nHosts:a\r\n", ParseError::IllegalFormat);
    test!(b"GET / HTTP/1.1\r\nHost:abcde\r\n", ParseError::IllegalFormat);
    test!(b"GET / HTTP/1.1\r\nHost:a\r\nAccept:a\r\n", ParseError::IllegalFormat);
    test!(b"GET / HTTP/1.1\r\nHost:a\r\nTE:abcdefgh\r\n", ParseError::IllegalFormat);
    test!(b"GET / HTTP/1.1\r\n:a\r\n", ParseError::IllegalHttpHeader(crate::http::InvalidHeader::EmptyName));
    test!(b"GET / HTTP/1.1\r\nHost:a\r\nTE:\r\n", ParseError::IllegalHttpHeader(crate::http::InvalidHeader::EmptyValue));
    test!(b"GET / HTTP/9\r\n", ParseError::IllegalHttpProtocol);

    // within bounds
    let config = ParsingConfig::new(4, 4, 3, 3, 8);
    assert!(drive(config, [&b"GET /ab HTTP/1.1\r\nHost:abcd\r\n\r\n"[..]]).is_ok());
}

// ===== Reader =====

#[tokio::test]
async fn test_frame_reader() {
    let input = &b"GET / HTTP/1.1\r\nHost:a\r\n\r\nGET / HT"[..];
    let mut reader = FrameReader::new(input, ParsingConfig::default());

    assert_eq!(reader.next_frame().await.unwrap(), Some(reqline(Method::GET, "/", Protocol::HTTP_11)));
    assert_eq!(reader.next_frame().await.unwrap(), Some(header("Host", "a")));
    assert_eq!(reader.next_frame().await.unwrap(), Some(Frame::EntityEnd));

    // incomplete message at end of input is dropped silently
    assert_eq!(reader.next_frame().await.unwrap(), None);
    assert!(reader.is_terminated());
    assert_eq!(reader.next_frame().await.unwrap(), None);
}

#[tokio::test]
async fn test_frame_reader_error() {
    let input = &b"GET / HTTP/3\r\n"[..];
    let mut reader = FrameReader::new(input, ParsingConfig::default());

    match reader.next_frame().await {
        Err(ConnectionError::Parse(ParseError::IllegalHttpProtocol)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(reader.is_terminated());
}

// ===== Assembler =====

#[tokio::test]
async fn test_assemble_empty() {
    let mut asm = RequestAssembler::new(1);

    assert!(asm.push(reqline(Method::GET, "/a", Protocol::HTTP_11)).await.unwrap().is_none());
    assert!(asm.push(header("Host", "a")).await.unwrap().is_none());
    assert!(asm.push(header("Accept", "*/*")).await.unwrap().is_none());
    assert!(!asm.is_done());

    let req = asm.push(Frame::EntityEnd).await.unwrap().unwrap();
    assert!(asm.is_done());
    assert!(!asm.is_streaming());
    assert!(asm.truncated().is_none());

    assert_eq!(req.method(), &Method::GET);
    assert_eq!(req.uri(), "/a");
    assert_eq!(req.headers().len(), 2);
    assert_eq!(req.header("accept").unwrap().value(), "*/*");
    assert!(req.entity().is_empty());

    // one request per assembler
    assert!(matches!(
        asm.push(reqline(Method::GET, "/", Protocol::HTTP_11)).await,
        Err(ConnectionError::UnexpectedFrame)
    ));
}

#[tokio::test]
async fn test_assemble_streaming() {
    let mut asm = RequestAssembler::new(1);
    asm.push(reqline(Method::POST, "/", Protocol::HTTP_11)).await.unwrap();
    asm.push(header("Content-Length", "5")).await.unwrap();

    // released before the entity arrives
    let mut req = asm.push(Frame::EntityStart(5)).await.unwrap().unwrap();
    assert!(asm.is_streaming());
    assert!(req.entity().is_streaming());
    assert_eq!(req.entity().length(), 5);

    let collect = tokio::spawn(req.take_entity().collect());

    asm.push(Frame::EntityChunk(Bytes::from_static(b"hel"))).await.unwrap();
    asm.push(Frame::EntityChunk(Bytes::from_static(b"lo"))).await.unwrap();
    assert!(asm.push(Frame::EntityEnd).await.unwrap().is_none());
    assert!(asm.is_done());

    assert_eq!(collect.await.unwrap().unwrap(), &b"hello"[..]);
}

#[tokio::test]
async fn test_assemble_dropped_entity() {
    let mut asm = RequestAssembler::new(1);
    asm.push(reqline(Method::POST, "/", Protocol::HTTP_11)).await.unwrap();
    asm.push(header("Content-Length", "6")).await.unwrap();
    let req = asm.push(Frame::EntityStart(6)).await.unwrap().unwrap();
    drop(req);

    // discarded without waiting for a consumer
    asm.push(Frame::EntityChunk(Bytes::from_static(b"abc"))).await.unwrap();
    asm.push(Frame::EntityChunk(Bytes::from_static(b"def"))).await.unwrap();
    asm.push(Frame::EntityEnd).await.unwrap();
    assert!(asm.is_done());
}

#[tokio::test]
async fn test_assemble_truncated() {
    let mut asm = RequestAssembler::new(4);
    asm.push(reqline(Method::POST, "/", Protocol::HTTP_11)).await.unwrap();
    asm.push(header("Content-Length", "5")).await.unwrap();
    let mut req = asm.push(Frame::EntityStart(5)).await.unwrap().unwrap();
    asm.push(Frame::EntityChunk(Bytes::from_static(b"abc"))).await.unwrap();

    match asm.truncated() {
        Some(crate::body::EntityError::Truncated { expected: 5, received: 3 }) => {}
        other => panic!("unexpected: {other:?}"),
    }

    drop(asm);
    let err = req.take_entity().collect().await.unwrap_err();
    assert!(err.is_truncated());
}

#[tokio::test]
async fn test_assemble_abort() {
    let mut asm = RequestAssembler::new(4);
    asm.push(reqline(Method::POST, "/", Protocol::HTTP_11)).await.unwrap();
    asm.push(header("Content-Length", "5")).await.unwrap();
    let mut req = asm.push(Frame::EntityStart(5)).await.unwrap().unwrap();
    asm.push(Frame::EntityChunk(Bytes::from_static(b"ab"))).await.unwrap();

    asm.abort(EntityError::Io(io::ErrorKind::ConnectionReset.into()));
    drop(asm);

    match req.take_entity().collect().await {
        Err(EntityError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_assemble_out_of_order() {
    let mut asm = RequestAssembler::new(1);
    assert!(matches!(asm.push(header("Host", "a")).await, Err(ConnectionError::UnexpectedFrame)));

    let mut asm = RequestAssembler::new(1);
    assert!(matches!(
        asm.push(Frame::EntityChunk(Bytes::from_static(b"a"))).await,
        Err(ConnectionError::UnexpectedFrame)
    ));

    let mut asm = RequestAssembler::new(1);
    assert!(matches!(asm.push(Frame::EntityEnd).await, Err(ConnectionError::UnexpectedFrame)));
}

// ===== Policy =====

#[test]
fn test_connection_policy() {
    macro_rules! test {
        ($protocol:ident, [$($name:literal: $value:literal),*], $close:literal) => {
            let headers = [$(RawHeader::new($name, $value).unwrap()),*];
            assert_eq!(should_close(Protocol::$protocol, &headers), $close, "{:?}", headers);
        };
    }

    test!(HTTP_10, [], true);
    test!(HTTP_10, ["Connection": "keep-alive"], false);
    test!(HTTP_10, ["connection": "Keep-Alive"], false);
    test!(HTTP_10, ["Connection": "close"], true);
    test!(HTTP_10, ["Host": "a"], true);
    test!(HTTP_11, [], false);
    test!(HTTP_11, ["Connection": "close"], true);
    test!(HTTP_11, ["Connection": "foo, CLOSE"], true);
    test!(HTTP_11, ["Connection": "keep-alive"], false);
    test!(HTTP_11, ["Connection": "upgrade"], false);
    test!(HTTP_11, ["Connection": "foo", "Connection": "close"], true);
}

// ===== Serializer =====

#[tokio::test]
async fn test_serialize() {
    let mut buf = BytesMut::new();

    let res = Response::with(StatusCode::OK, vec![RawHeader::content_length(4)], Entity::strict("pong"));
    let mut out = vec![];
    write_response(&mut out, Protocol::HTTP_11, res, &mut buf).await.unwrap();
    assert_eq!(out, b"HTTP/1.1 200 OK\r\nContent-Length:4\r\n\r\npong");

    let res = Response::new(StatusCode::NOT_FOUND);
    let mut out = vec![];
    write_response(&mut out, Protocol::HTTP_10, res, &mut buf).await.unwrap();
    assert_eq!(out, b"HTTP/1.0 404 Not Found\r\nContent-Length:0\r\n\r\n");

    // list order, no normalization
    let headers = vec![
        RawHeader::new("x-b", "2").unwrap(),
        RawHeader::new("X-A", "1").unwrap(),
        RawHeader::new("x-b", "3").unwrap(),
    ];
    encode_head(Protocol::HTTP_11, &StatusCode::NO_CONTENT, &headers, &mut buf);
    assert_eq!(&buf[..], b"HTTP/1.1 204 No Content\r\nx-b:2\r\nX-A:1\r\nx-b:3\r\n\r\n");
}

#[tokio::test]
async fn test_serialize_streaming() {
    let (tx, entity) = Entity::channel(5, 1);
    let res = Response::with(StatusCode::OK, vec![RawHeader::content_length(5)], entity);

    tokio::spawn(async move {
        tx.send(Bytes::from_static(b"hel")).await.unwrap();
        tx.send(Bytes::from_static(b"lo")).await.unwrap();
    });

    let mut out = vec![];
    write_response(&mut out, Protocol::HTTP_11, res, &mut BytesMut::new()).await.unwrap();
    assert_eq!(out, b"HTTP/1.1 200 OK\r\nContent-Length:5\r\n\r\nhello");
}

#[tokio::test]
async fn test_serialize_truncated() {
    let (tx, entity) = Entity::channel(5, 1);
    let res = Response::with(StatusCode::OK, vec![RawHeader::content_length(5)], entity);
    tx.send(Bytes::from_static(b"hel")).await.unwrap();
    drop(tx);

    let mut out = vec![];
    let err = write_response(&mut out, Protocol::HTTP_11, res, &mut BytesMut::new()).await.unwrap_err();
    assert!(matches!(err, ConnectionError::Entity(e) if e.is_truncated()));
}

// ===== Connection =====

const PING: &[u8] = b"GET /ping HTTP/1.1\r\nHost:localhost\r\n\r\n";
const PONG: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length:4\r\nContent-Type:text/plain\r\n\r\npong";

fn handler() -> Composite {
    Composite::new()
        .with(Ping)
        .with(from_fn(
            |req: &Request| req.uri().path() == "/echo",
            |mut req: Request| async move {
                let body = req.take_entity().collect().await?;
                Ok::<_, BoxError>(Response::ok(APPLICATION_OCTET_STREAM, body))
            },
        ))
        .with(from_fn(
            |req: &Request| req.uri().path() == "/stream",
            |mut req: Request| async move {
                let len = req.entity().length();
                let headers = vec![RawHeader::content_length(len)];
                Ok::<_, BoxError>(Response::with(StatusCode::OK, headers, req.take_entity()))
            },
        ))
        .with(from_fn(
            |req: &Request| req.uri().path() == "/fail",
            |_| async { Err::<Response, _>("failure") },
        ))
}

/// Write `input` then close the write side, returns the connection result and everything
/// written back.
async fn exchange(handler: impl Handler, input: Vec<u8>) -> (Result<(), ConnectionError>, Vec<u8>) {
    let (client, server) = tokio::io::duplex(4 * 1024);
    let conn = Connection::new(server, Arc::new(handler), ParsingConfig::default()).with_entity_buffer(1);
    let serve = tokio::spawn(conn.serve());

    let (mut read, mut write) = tokio::io::split(client);
    let writer = tokio::spawn(async move {
        write.write_all(&input).await?;
        write.shutdown().await
    });

    let mut output = vec![];
    read.read_to_end(&mut output).await.unwrap();
    // fails if the server closed first
    let _ = writer.await.unwrap();

    (serve.await.unwrap(), output)
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

#[tokio::test]
async fn test_keep_alive() {
    let (result, output) = exchange(handler(), concat(&[PING, PING, PING])).await;
    assert!(result.is_ok());
    assert_eq!(output, concat(&[PONG, PONG, PONG]));
}

#[tokio::test]
async fn test_http10_close() {
    let input = concat(&[b"GET /ping HTTP/1.0\r\nHost:a\r\n\r\n", PING]);
    let (result, output) = exchange(handler(), input).await;
    assert!(result.is_ok());
    assert_eq!(
        output,
        b"HTTP/1.0 200 OK\r\nContent-Length:4\r\nContent-Type:text/plain\r\n\r\npong"
    );

    let input = concat(&[b"GET /ping HTTP/1.0\r\nConnection:keep-alive\r\n\r\n", PING]);
    let (_, output) = exchange(handler(), input).await;
    assert!(output.ends_with(PONG));
}

#[tokio::test]
async fn test_http11_close() {
    let input = concat(&[b"GET /ping HTTP/1.1\r\nConnection:close\r\n\r\n", PING]);
    let (result, output) = exchange(handler(), input).await;
    assert!(result.is_ok());
    assert_eq!(output, PONG);
}

#[tokio::test]
async fn test_not_found_and_failure() {
    let input = concat(&[
        b"GET /missing HTTP/1.1\r\nHost:a\r\n\r\n",
        b"GET /fail HTTP/1.1\r\nHost:a\r\n\r\n",
        PING,
    ]);
    let (result, output) = exchange(handler(), input).await;
    assert!(result.is_ok());
    assert_eq!(
        output,
        concat(&[
            b"HTTP/1.1 404 Not Found\r\nContent-Length:0\r\n\r\n",
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length:0\r\n\r\n",
            PONG,
        ])
    );
}

#[tokio::test]
async fn test_unmatched_handler() {
    let (result, output) = exchange(Ping, concat(&[b"GET / HTTP/1.1\r\nHost:a\r\n\r\n", PING])).await;
    assert!(result.is_ok());
    assert_eq!(output, concat(&[b"HTTP/1.1 404 Not Found\r\nContent-Length:0\r\n\r\n", PONG]));
}

#[tokio::test]
async fn test_echo() {
    let input = concat(&[b"POST /echo HTTP/1.1\r\nContent-Length:11\r\n\r\nhello world", PING]);
    let (result, output) = exchange(handler(), input).await;
    assert!(result.is_ok());
    assert_eq!(
        output,
        concat(&[
            b"HTTP/1.1 200 OK\r\nContent-Length:11\r\nContent-Type:application/octet-stream\r\n\r\nhello world",
            PONG,
        ])
    );
}

#[tokio::test]
async fn test_streaming_echo() {
    // larger than the transport buffer, entity and response are streamed concurrently
    let body: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
    let head = format!("PUT /stream HTTP/1.1\r\nContent-Length:{}\r\n\r\n", body.len());
    let input = concat(&[head.as_bytes(), &body, PING]);

    let (result, output) = exchange(handler(), input).await;
    assert!(result.is_ok());

    let expected_head = format!("HTTP/1.1 200 OK\r\nContent-Length:{}\r\n\r\n", body.len());
    assert_eq!(output, concat(&[expected_head.as_bytes(), &body, PONG]));
}

#[tokio::test]
async fn test_entity_backpressure() {
    // the handler holds the entity without reading it
    let handler = from_fn(
        |_: &Request| true,
        |req: Request| async move {
            std::future::pending::<()>().await;
            drop(req);
            Ok::<_, BoxError>(Response::new(StatusCode::OK))
        },
    );

    let (mut client, server) = tokio::io::duplex(64);
    let conn = Connection::new(server, Arc::new(handler), ParsingConfig::default()).with_entity_buffer(1);
    let serve = tokio::spawn(conn.serve());

    client.write_all(b"POST / HTTP/1.1\r\nContent-Length:100000\r\n\r\n").await.unwrap();

    let chunk = [b'x'; 64];
    let mut written = 0;
    while written < 100_000 {
        match tokio::time::timeout(Duration::from_millis(50), client.write(&chunk)).await {
            Ok(Ok(n)) => written += n,
            Ok(Err(err)) => panic!("write failed: {err}"),
            Err(_) => break,
        }
    }

    // a channel of one chunk, one pending send, and the transport buffer
    assert!(written < 1024, "transport read ahead of the entity consumer: {written} bytes");
    serve.abort();
}

/// Transport that yields `input` once, then fails with `ConnectionReset`.
struct ResetAfter {
    input: Option<&'static [u8]>,
    output: Arc<Mutex<Vec<u8>>>,
}

impl AsyncRead for ResetAfter {
    fn poll_read(mut self: Pin<&mut Self>, _: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        match self.input.take() {
            Some(input) => {
                buf.put_slice(input);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(io::ErrorKind::ConnectionReset.into())),
        }
    }
}

impl AsyncWrite for ResetAfter {
    fn poll_write(self: Pin<&mut Self>, _: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        self.output.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn test_transport_failure_in_entity() {
    let handler = from_fn(
        |_: &Request| true,
        |mut req: Request| async move {
            let outcome = match req.take_entity().collect().await {
                Ok(_) => "complete",
                Err(EntityError::Io(_)) => "io",
                Err(EntityError::Truncated { .. }) => "truncated",
            };
            Ok::<_, BoxError>(Response::ok(TEXT_PLAIN, outcome))
        },
    );

    let output = Arc::new(Mutex::new(vec![]));
    let io = ResetAfter {
        input: Some(&b"POST / HTTP/1.1\r\nContent-Length:10\r\n\r\nabc"[..]),
        output: Arc::clone(&output),
    };
    let result = Connection::new(io, Arc::new(handler), ParsingConfig::default())
        .with_entity_buffer(4)
        .serve()
        .await;

    match result {
        Err(ConnectionError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("unexpected result: {other:?}"),
    }

    // the consumer observed the transport failure, not a truncation
    let output = output.lock().unwrap();
    assert!(output.ends_with(b"\r\n\r\nio"), "{}", String::from_utf8_lossy(&output));
}

#[tokio::test]
async fn test_unread_entity() {
    // entity is discarded when the handler ignores it
    let input = concat(&[b"POST /ping HTTP/1.1\r\nContent-Length:3\r\n\r\nabc", PING]);
    let (result, output) = exchange(Ping, input).await;
    assert!(result.is_ok());
    assert_eq!(output, concat(&[b"HTTP/1.1 404 Not Found\r\nContent-Length:0\r\n\r\n", PONG]));

    let input = concat(&[b"GET /ping HTTP/1.1\r\nContent-Length:3\r\n\r\nabc", PING]);
    let (result, output) = exchange(Ping, input).await;
    assert!(result.is_ok());
    assert_eq!(output, concat(&[PONG, PONG]));
}

#[tokio::test]
async fn test_parse_failure() {
    let input = concat(&[PING, b"GET / HTTP/2.0\r\nHost:a\r\n\r\n", PING]);
    let (result, output) = exchange(handler(), input).await;

    assert!(matches!(result, Err(ConnectionError::Parse(ParseError::IllegalHttpProtocol))));
    // the request before the malformed one is still served
    assert_eq!(output, PONG);
}

#[tokio::test]
async fn test_truncated_entity() {
    let input = b"POST /echo HTTP/1.1\r\nContent-Length:10\r\n\r\nabc".to_vec();
    let (result, output) = exchange(handler(), input).await;

    match result {
        Err(ConnectionError::Entity(err)) => assert!(err.is_truncated()),
        other => panic!("unexpected result: {other:?}"),
    }
    // the handler observed the truncation
    assert!(output.starts_with(b"HTTP/1.1 500 Internal Server Error\r\n"));
}

#[tokio::test]
async fn test_incomplete_request() {
    let input = concat(&[PING, b"GET /ping HTTP/1.1\r\nHo"]);
    let (result, output) = exchange(handler(), input).await;
    assert!(result.is_ok());
    assert_eq!(output, PONG);
}
