use bytes::{Bytes, BytesMut};

use super::Frame;
use crate::config::ParsingConfig;
use crate::http::{RawHeader, header};
use crate::parser::{EmptyLineParser, HeaderParser, ParseError, RequestLineParser};

/// HTTP/1 framing state.
///
/// A state is a value: it runs its parse step once, on construction, and caches the outcome.
/// Feeding more bytes with [`next`][FramingState::next] builds the following state instead of
/// mutating this one.
///
/// ```text
/// RequestLine -> Header -> EmptyLineOrHeader --+-> EntityEnd -------------------> RequestLine
///                             ^          |     |
///                             +- header -+     +-> EntityStart -> EntityChunk.. -> EntityEnd
/// ```
#[derive(Debug, Clone)]
pub struct FramingState {
    config: ParsingConfig,
    kind: Kind,
    buffer: Bytes,
    frame: Option<Frame>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    RequestLine,
    Header,
    EmptyLineOrHeader(Vec<RawHeader>),
    EntityChunk(u64),
    EntityEnd,
}

impl FramingState {
    /// Create the initial state, awaiting a request line.
    pub fn new(config: ParsingConfig) -> FramingState {
        FramingState {
            config,
            kind: Kind::RequestLine,
            buffer: Bytes::new(),
            frame: None,
        }
    }

    fn build(config: ParsingConfig, kind: Kind, buffer: Bytes) -> Result<FramingState, ParseError> {
        let (frame, buffer) = match &kind {
            Kind::RequestLine => RequestLineParser::new(
                config.method_length(),
                config.uri_length(),
                config.protocol_length(),
            )
            .parse(&buffer)?
            .map(Frame::RequestLine)
            .into_parts(),
            Kind::Header => header_parser(&config).parse(&buffer)?.map(Frame::Header).into_parts(),
            Kind::EmptyLineOrHeader(headers) => match EmptyLineParser.parse(&buffer) {
                Ok(scan) => scan
                    .map(|()| match header::content_length(headers) {
                        Some(len) if len > 0 => Frame::EntityStart(len),
                        _ => Frame::EntityEnd,
                    })
                    .into_parts(),
                Err(ParseError::ExpectingEmptyLine) => {
                    header_parser(&config).parse(&buffer)?.map(Frame::Header).into_parts()
                }
                Err(err) => return Err(err),
            },
            Kind::EntityChunk(remaining) => {
                if buffer.is_empty() {
                    (None, buffer)
                } else {
                    let len = usize::try_from(*remaining).map_or(buffer.len(), |r| r.min(buffer.len()));
                    let mut chunk = buffer;
                    let rest = chunk.split_off(len);
                    (Some(Frame::EntityChunk(chunk)), rest)
                }
            }
            Kind::EntityEnd => (Some(Frame::EntityEnd), buffer),
        };

        Ok(FramingState { config, kind, buffer, frame })
    }

    /// Returns `true` if this state holds bytes not consumed by its frame.
    #[inline]
    pub fn has_bytes(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Returns the bytes not consumed by this state.
    #[inline]
    pub fn remaining(&self) -> &Bytes {
        &self.buffer
    }

    /// Returns the frame produced by this state, if any.
    #[inline]
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Transition to the next state with newly arrived `bytes`, which may be empty.
    ///
    /// If this state produced a frame, the returned state is the one following that frame,
    /// otherwise it is the same state retried with the additional bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the next state fails to parse.
    pub fn next(self, bytes: Bytes) -> Result<FramingState, ParseError> {
        let FramingState { config, kind, buffer, frame } = self;

        let kind = match (kind, frame) {
            (kind, None) => kind,
            (Kind::RequestLine, Some(_)) => Kind::Header,
            (Kind::Header, Some(Frame::Header(header))) => Kind::EmptyLineOrHeader(vec![header]),
            (Kind::EmptyLineOrHeader(mut headers), Some(Frame::Header(header))) => {
                headers.push(header);
                Kind::EmptyLineOrHeader(headers)
            }
            (Kind::EmptyLineOrHeader(_), Some(Frame::EntityStart(len))) => Kind::EntityChunk(len),
            (Kind::EntityChunk(remaining), Some(Frame::EntityChunk(chunk))) => {
                match remaining.saturating_sub(chunk.len() as u64) {
                    0 => Kind::EntityEnd,
                    remaining => Kind::EntityChunk(remaining),
                }
            }
            // `EntityEnd` from either the entity or the header section
            (_, Some(_)) => Kind::RequestLine,
        };

        FramingState::build(config, kind, concat(buffer, bytes))
    }
}

fn header_parser(config: &ParsingConfig) -> HeaderParser {
    HeaderParser::new(config.header_name_length(), config.header_value_length())
}

fn concat(head: Bytes, tail: Bytes) -> Bytes {
    if head.is_empty() {
        return tail;
    }
    if tail.is_empty() {
        return head;
    }
    let mut buffer = BytesMut::with_capacity(head.len() + tail.len());
    buffer.extend_from_slice(&head);
    buffer.extend_from_slice(&tail);
    buffer.freeze()
}
