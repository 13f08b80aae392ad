//! Request handlers.
//!
//! - [`Handler`] the request handler capability
//! - [`Composite`] first match wins list of handlers
//! - [`from_fn`] handler from closures
//! - [`Ping`] liveness handler
use std::future::{Future, ready};
use std::pin::Pin;
use std::sync::Arc;

use crate::http::header::TEXT_PLAIN;
use crate::http::{Method, Request, Response, StatusCode};

/// Handler failure, responded with `500 Internal Server Error`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by [`Handler::apply`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response, BoxError>> + Send>>;

// ===== Handler =====

/// Request handler.
pub trait Handler: Send + Sync + 'static {
    /// Returns `true` if this handler accepts `request`.
    fn matches(&self, request: &Request) -> bool;

    /// Handle the request.
    ///
    /// Only called with requests accepted by [`matches`][Handler::matches].
    fn apply(&self, request: Request) -> HandlerFuture;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    #[inline]
    fn matches(&self, request: &Request) -> bool {
        H::matches(self, request)
    }

    #[inline]
    fn apply(&self, request: Request) -> HandlerFuture {
        H::apply(self, request)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    #[inline]
    fn matches(&self, request: &Request) -> bool {
        H::matches(self, request)
    }

    #[inline]
    fn apply(&self, request: Request) -> HandlerFuture {
        H::apply(self, request)
    }
}

// ===== Composite =====

/// First match wins list of handlers.
///
/// Matches every request, unmatched requests are responded with `404 Not Found`.
#[derive(Default)]
pub struct Composite {
    handlers: Vec<Box<dyn Handler>>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler, tried after the ones already added.
    pub fn with(mut self, handler: impl Handler) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn push(&mut self, handler: impl Handler) {
        self.handlers.push(Box::new(handler));
    }
}

impl Handler for Composite {
    fn matches(&self, _: &Request) -> bool {
        true
    }

    fn apply(&self, request: Request) -> HandlerFuture {
        match self.handlers.iter().find(|h| h.matches(&request)) {
            Some(handler) => handler.apply(request),
            None => Box::pin(ready(Ok(Response::new(StatusCode::NOT_FOUND)))),
        }
    }
}

impl std::fmt::Debug for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composite")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

// ===== FromFn =====

/// Create a [`Handler`] from a predicate and an async function.
pub fn from_fn<M, F, Fut>(matches: M, apply: F) -> FromFn<M, F>
where
    M: Fn(&Request) -> bool,
    F: Fn(Request) -> Fut,
{
    FromFn { matches, apply }
}

/// Handler returned by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<M, F> {
    matches: M,
    apply: F,
}

impl<M, F, Fut, E> Handler for FromFn<M, F>
where
    M: Fn(&Request) -> bool + Send + Sync + 'static,
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
    E: Into<BoxError>,
{
    #[inline]
    fn matches(&self, request: &Request) -> bool {
        (self.matches)(request)
    }

    fn apply(&self, request: Request) -> HandlerFuture {
        let future = (self.apply)(request);
        Box::pin(async move { future.await.map_err(Into::into) })
    }
}

impl<M, F> std::fmt::Debug for FromFn<M, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

// ===== Ping =====

/// Responds `pong` to `GET /ping`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ping;

impl Ping {
    pub const PATH: &'static str = "/ping";
}

impl Handler for Ping {
    fn matches(&self, request: &Request) -> bool {
        request.method() == &Method::GET && request.uri().path() == Self::PATH
    }

    fn apply(&self, _: Request) -> HandlerFuture {
        Box::pin(ready(Ok(Response::ok(TEXT_PLAIN, "pong"))))
    }
}
