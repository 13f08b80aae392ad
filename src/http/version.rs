/// HTTP Protocol version of a request line.
///
/// Only `HTTP/1.0` and `HTTP/1.1` are recognized, any other token fails parsing.
///
/// [httpwg](https://httpwg.org/specs/rfc9112.html#http.version)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Protocol(Inner);

#[derive(PartialEq, PartialOrd, Copy, Clone, Eq, Ord, Hash)]
enum Inner {
    Http10,
    Http11,
}

impl Protocol {
    /// `HTTP/1.0`
    pub const HTTP_10: Protocol = Protocol(Inner::Http10);

    /// `HTTP/1.1`
    pub const HTTP_11: Protocol = Protocol(Inner::Http11);

    /// Match the exact protocol token, e.g: `HTTP/1.1`.
    #[inline]
    pub const fn from_bytes(src: &[u8]) -> Option<Protocol> {
        match src {
            b"HTTP/1.0" => Some(Self::HTTP_10),
            b"HTTP/1.1" => Some(Self::HTTP_11),
            _ => None,
        }
    }

    /// Returns string representation of HTTP protocol, e.g: `HTTP/1.1`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Http10 => "HTTP/1.0",
            Inner::Http11 => "HTTP/1.1",
        }
    }
}

impl Default for Protocol {
    #[inline]
    fn default() -> Protocol {
        Protocol::HTTP_11
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
