use crate::http::header::ConnectionOptions;
use crate::http::{Protocol, RawHeader, Request};

/// Returns `true` if the connection must close after responding to a message with given
/// protocol and headers.
///
/// - `HTTP/1.0` closes unless `Connection` contains `keep-alive`
/// - `HTTP/1.1` closes only if `Connection` contains `close`
pub fn should_close(protocol: Protocol, headers: &[RawHeader]) -> bool {
    let options = ConnectionOptions::from_headers(headers);
    if protocol == Protocol::HTTP_11 {
        options.is_some_and(|o| o.has_close())
    } else {
        !options.is_some_and(|o| o.has_keep_alive())
    }
}

/// [`should_close`] for a request.
#[inline]
pub fn request_should_close(request: &Request) -> bool {
    should_close(request.protocol(), request.headers())
}
