use std::borrow::Cow;
use std::fmt;

/// HTTP [Status Code][rfc], a numeric value paired with its reason phrase.
///
/// The value is always within `100..=999` and the name is never empty.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#name-status-codes>
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StatusCode {
    value: u16,
    name: Cow<'static, str>,
}

impl StatusCode {
    /// Create a status code from a value and a reason phrase.
    ///
    /// The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatusCode`] if the value is outside `100..=999`, or the name is empty
    /// after trimming.
    pub fn new(value: u16, name: impl Into<Cow<'static, str>>) -> Result<Self, InvalidStatusCode> {
        if !(100..=999).contains(&value) {
            return Err(InvalidStatusCode::Value(value));
        }
        let name = match name.into() {
            Cow::Borrowed(name) => Cow::Borrowed(name.trim()),
            Cow::Owned(name) => Cow::Owned(name.trim().to_owned()),
        };
        if name.is_empty() {
            return Err(InvalidStatusCode::EmptyName);
        }
        Ok(Self { value, name })
    }

    /// Returns status code value, e.g: `200`.
    #[inline]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Returns status reason phrase, e.g: `"OK"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for `4xx` and `5xx` codes.
    #[inline]
    pub const fn is_error(&self) -> bool {
        self.value >= 400
    }
}

macro_rules! status_code {
    (
        $(
            $(#[$doc:meta])*
            $int:literal $id:ident $msg:literal;
        )*
    ) => {
        impl StatusCode {
            $(
                $(#[$doc])*
                pub const $id: Self = Self { value: $int, name: Cow::Borrowed($msg) };
            )*
        }
    };
}

status_code! {
    /// `200`. The request succeeded.
    200 OK "OK";
    /// `201`. The request succeeded, and a new resource was created as a result.
    201 CREATED "Created";
    /// `204`. There is no content to send for this request, but the headers are useful.
    204 NO_CONTENT "No Content";
    /// `400`. The server cannot or will not process the request due to something that is perceived to be
    /// a client error.
    400 BAD_REQUEST "Bad Request";
    /// `404`. The server cannot find the requested resource.
    404 NOT_FOUND "Not Found";
    /// `405`. The request method is known by the server but is not supported by the target resource.
    405 METHOD_NOT_ALLOWED "Method Not Allowed";
    /// `408`. The server would like to shut down this unused connection.
    408 REQUEST_TIMEOUT "Request Timeout";
    /// `411`. Server rejected the request because the `Content-Length` header field is not defined and the
    /// server requires it.
    411 LENGTH_REQUIRED "Length Required";
    /// `413`. The request body is larger than limits defined by server.
    413 CONTENT_TOO_LARGE "Content Too Large";
    /// `414`. The URI requested by the client is longer than the server is willing to interpret.
    414 URI_TOO_LONG "URI Too Long";
    /// `431`. The server is unwilling to process the request because its header fields are too large.
    431 REQUEST_HEADER_FIELDS_TOO_LARGE "Request Header Fields Too Large";
    /// `500`. The server has encountered a situation it does not know how to handle.
    500 INTERNAL_SERVER_ERROR "Internal Server Error";
    /// `501`. The request method is not supported by the server and cannot be handled.
    501 NOT_IMPLEMENTED "Not Implemented";
    /// `503`. The server is not ready to handle the request.
    503 SERVICE_UNAVAILABLE "Service Unavailable";
    /// `505`. The HTTP version used in the request is not supported by the server.
    505 HTTP_VERSION_NOT_SUPPORTED "HTTP Version Not Supported";
}

impl Default for StatusCode {
    #[inline]
    fn default() -> Self {
        Self::OK
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.value, self.name)
    }
}

impl fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("StatusCode").field(&self.value).field(&self.name).finish()
    }
}

// ===== Error =====

/// Error when constructing [`StatusCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidStatusCode {
    /// Value outside `100..=999`.
    Value(u16),
    /// Name is empty or whitespace only.
    EmptyName,
}

impl std::error::Error for InvalidStatusCode { }

impl fmt::Display for InvalidStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "status code {value} is not within [100, 999]"),
            Self::EmptyName => f.write_str("status code name cannot be empty"),
        }
    }
}
