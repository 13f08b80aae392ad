use super::StatusCode;
use super::header::{self, RawHeader};
use crate::body::Entity;

/// HTTP Response.
///
/// Headers are written in list order, without deduplication or case normalization.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: Vec<RawHeader>,
    entity: Entity,
}

impl Response {
    /// Create a bodiless response with a `Content-Length: 0` header.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: vec![RawHeader::content_length(0)],
            entity: Entity::Empty,
        }
    }

    /// Create a response from all its parts.
    #[inline]
    pub fn with(status: StatusCode, headers: Vec<RawHeader>, entity: Entity) -> Self {
        Self { status, headers, entity }
    }

    /// Create `200 OK` response with a strict body and its `Content-Length` and `Content-Type`
    /// headers.
    ///
    /// `Content-Type` is omitted if `content_type` is empty after trimming.
    pub fn ok(content_type: &str, entity: impl Into<Entity>) -> Self {
        let entity = entity.into();
        let mut headers = vec![RawHeader::content_length(entity.length())];
        headers.extend(RawHeader::content_type(content_type).ok());
        Self {
            status: StatusCode::OK,
            headers,
            entity,
        }
    }

    /// Returns the status code.
    #[inline]
    pub const fn status(&self) -> &StatusCode {
        &self.status
    }

    /// Returns the headers in write order.
    #[inline]
    pub fn headers(&self) -> &[RawHeader] {
        &self.headers
    }

    /// Returns the first header with given name, ignoring ASCII case.
    #[inline]
    pub fn header(&self, name: &str) -> Option<&RawHeader> {
        header::get(&self.headers, name)
    }

    /// Append a header.
    #[inline]
    pub fn push_header(&mut self, header: RawHeader) {
        self.headers.push(header);
    }

    /// Returns the response entity.
    #[inline]
    pub const fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Destructure the response.
    #[inline]
    pub fn into_parts(self) -> (StatusCode, Vec<RawHeader>, Entity) {
        (self.status, self.headers, self.entity)
    }
}

impl Default for Response {
    #[inline]
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}
