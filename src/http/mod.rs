//! HTTP Protocol types.
mod method;
mod status;
mod version;
mod request;
mod response;

pub mod header;

pub use method::{Method, InvalidMethod};
pub use version::Protocol;
pub use status::{StatusCode, InvalidStatusCode};
pub use header::{RawHeader, InvalidHeader};
pub use request::{Request, RequestLine};
pub use response::Response;

#[doc(no_inline)]
pub use ::http::Uri;
