use ::http::Uri;

use super::header::{self, RawHeader};
use super::{Method, Protocol};
use crate::body::Entity;

/// Request line, `METHOD SP URI SP PROTOCOL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    uri: Uri,
    protocol: Protocol,
}

impl RequestLine {
    /// Create new [`RequestLine`].
    #[inline]
    pub const fn new(method: Method, uri: Uri, protocol: Protocol) -> Self {
        Self { method, uri, protocol }
    }

    /// Returns the request method.
    #[inline]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request target.
    #[inline]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request protocol.
    #[inline]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }
}

/// HTTP Request.
///
/// Headers are kept in arrival order.
#[derive(Debug)]
pub struct Request {
    line: RequestLine,
    headers: Vec<RawHeader>,
    entity: Entity,
}

impl Request {
    /// Create new [`Request`].
    #[inline]
    pub fn new(line: RequestLine, headers: Vec<RawHeader>, entity: Entity) -> Self {
        Self { line, headers, entity }
    }

    /// Returns the request line.
    #[inline]
    pub const fn line(&self) -> &RequestLine {
        &self.line
    }

    /// Returns the request method.
    #[inline]
    pub const fn method(&self) -> &Method {
        self.line.method()
    }

    /// Returns the request target.
    #[inline]
    pub const fn uri(&self) -> &Uri {
        self.line.uri()
    }

    /// Returns the request protocol.
    #[inline]
    pub const fn protocol(&self) -> Protocol {
        self.line.protocol()
    }

    /// Returns the headers in arrival order.
    #[inline]
    pub fn headers(&self) -> &[RawHeader] {
        &self.headers
    }

    /// Returns the first header with given name, ignoring ASCII case.
    #[inline]
    pub fn header(&self, name: &str) -> Option<&RawHeader> {
        header::get(&self.headers, name)
    }

    /// Returns the request entity.
    #[inline]
    pub const fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Take the request entity, leaving [`Entity::Empty`] in its place.
    #[inline]
    pub fn take_entity(&mut self) -> Entity {
        std::mem::take(&mut self.entity)
    }

    /// Destructure the request.
    #[inline]
    pub fn into_parts(self) -> (RequestLine, Vec<RawHeader>, Entity) {
        (self.line, self.headers, self.entity)
    }
}
