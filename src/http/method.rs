use std::fmt;

/// HTTP Method.
///
/// This API follows the [RFC9110] and the PATCH method from [RFC5789].
///
/// Tokens outside the standard set are kept as a [custom][Method::custom] method.
///
/// [RFC5789]: https://www.rfc-editor.org/rfc/rfc5789
/// [RFC9110]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-methods>
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Method(Inner);

#[derive(Clone, PartialEq, Eq, Hash)]
enum Inner {
    Standard(u8),
    Custom(Box<str>),
}

struct Props {
    value: &'static str,
}

props! {
    static PROPS: [9];

    /// The [GET] method requests transfer of a current selected representation for the target
    /// resource.
    ///
    /// [GET]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-get>
    pub const GET = (0, "GET");
    /// The [HEAD] method is identical to GET except that the server MUST NOT send content in the
    /// response.
    ///
    /// [HEAD]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-head>
    pub const HEAD = (1, "HEAD");
    /// The [POST] method requests that the target resource process the representation enclosed in
    /// the request.
    ///
    /// [POST]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-post>
    pub const POST = (2, "POST");
    /// The [PUT] method requests that the state of the target resource be created or replaced.
    ///
    /// [PUT]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-put>
    pub const PUT = (3, "PUT");
    /// The [DELETE] method requests that the origin server remove the target resource.
    ///
    /// [DELETE]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-delete>
    pub const DELETE = (4, "DELETE");
    /// The [CONNECT] method requests a tunnel to the destination origin server.
    ///
    /// [CONNECT]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-connect>
    pub const CONNECT = (5, "CONNECT");
    /// The [OPTIONS] method requests the communication options available for the target resource.
    ///
    /// [OPTIONS]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-options>
    pub const OPTIONS = (6, "OPTIONS");
    /// The [TRACE] method requests a remote, application-level loop-back of the request message.
    ///
    /// [TRACE]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-trace>
    pub const TRACE = (7, "TRACE");
    /// The [PATCH] method requests that a set of changes described in the request entity be
    /// applied to the resource.
    ///
    /// [PATCH]: <https://www.rfc-editor.org/rfc/rfc5789#section-2>
    pub const PATCH = (8, "PATCH");
}

impl Method {
    /// Create a method from a request line token.
    ///
    /// Standard methods are matched exactly, anything else becomes a custom method.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMethod`] if the token is empty after trimming.
    pub fn from_token(token: &str) -> Result<Method, InvalidMethod> {
        let token = token.trim();
        match Self::from_standard(token.as_bytes()) {
            Some(ok) => Ok(ok),
            None => Self::custom(token),
        }
    }

    /// Create a custom method.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMethod`] if the token is empty after trimming.
    pub fn custom(token: &str) -> Result<Method, InvalidMethod> {
        let token = token.trim();
        if token.is_empty() {
            return Err(InvalidMethod);
        }
        Ok(Self(Inner::Custom(token.into())))
    }

    /// Returns `true` if method is one of the standard methods.
    #[inline]
    pub const fn is_standard(&self) -> bool {
        matches!(self.0, Inner::Standard(_))
    }

    /// Returns string representation of the method.
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Inner::Standard(idx) => PROPS[*idx as usize].value,
            Inner::Custom(value) => value,
        }
    }
}

impl std::str::FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            Inner::Standard(_) => f.write_str(self.as_str()),
            Inner::Custom(value) => f.debug_tuple("Custom").field(value).finish(),
        }
    }
}

impl fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

// ===== Error =====

/// Method token is empty or whitespace only.
pub struct InvalidMethod;

impl std::error::Error for InvalidMethod { }

impl fmt::Debug for InvalidMethod {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InvalidMethod")
    }
}

impl fmt::Display for InvalidMethod {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("method cannot be empty")
    }
}

// ===== Macros =====

macro_rules! props {
    (
        static $props:ident: [$len:literal];
        $(
           $(#[$doc:meta])*
           pub const $name:ident = ($idx:literal, $val:literal);
        )*
    ) => {
        impl Method {
            $(
               $(#[$doc])*
               pub const $name: Self = Self(Inner::Standard($idx));
            )*

            /// Match bytes against the standard methods.
            #[inline]
            pub const fn from_standard(src: &[u8]) -> Option<Method> {
                $(
                    if eq(src, $val.as_bytes()) {
                        return Some(Self::$name);
                    }
                )*
                None
            }
        }

        static $props: [Props; $len] = [
            $(
                Props { value: $val },
            )*
        ];
    };
}

use props;

const fn eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
