use bytes::Bytes;

use super::ParseError;

/// Outcome of a single parse step.
///
/// Holds the parsed value, if any, and the bytes not consumed by the step. A missing value means
/// more bytes are required, malformed input is reported as [`ParseError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<T> {
    value: Option<T>,
    remaining: Bytes,
}

impl<T> Scan<T> {
    /// Create a scan that produced `value`.
    #[inline]
    pub const fn done(value: T, remaining: Bytes) -> Self {
        Self {
            value: Some(value),
            remaining,
        }
    }

    /// Create a scan that requires more bytes.
    #[inline]
    pub const fn pending(remaining: Bytes) -> Self {
        Self {
            value: None,
            remaining,
        }
    }

    /// Returns `true` if no value is produced yet.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        self.value.is_none()
    }

    /// Returns reference to the produced value.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns the unconsumed bytes.
    #[inline]
    pub const fn remaining(&self) -> &Bytes {
        &self.remaining
    }

    /// Destructure into the optional value and the unconsumed bytes.
    #[inline]
    pub fn into_parts(self) -> (Option<T>, Bytes) {
        (self.value, self.remaining)
    }

    /// Returns the value and the unconsumed bytes if a value is produced.
    #[inline]
    pub fn into_done(self) -> Option<(T, Bytes)> {
        match self.value {
            Some(value) => Some((value, self.remaining)),
            None => None,
        }
    }

    /// Maps the produced value, keeping the unconsumed bytes.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scan<U> {
        Scan {
            value: self.value.map(f),
            remaining: self.remaining,
        }
    }

    /// Maps the produced value with a fallible function.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Scan<U>, E> {
        match self.value {
            Some(value) => Ok(Scan::done(f(value)?, self.remaining)),
            None => Ok(Scan::pending(self.remaining)),
        }
    }

    /// Continue parsing the unconsumed bytes with the produced value.
    ///
    /// If no value is produced, `f` is not called.
    pub fn and_then<U, E>(self, f: impl FnOnce(T, Bytes) -> Result<Scan<U>, E>) -> Result<Scan<U>, E> {
        match self.value {
            Some(value) => f(value, self.remaining),
            None => Ok(Scan::pending(self.remaining)),
        }
    }

    /// If no value is produced, reset the unconsumed bytes to `input`.
    ///
    /// A composed parse that stops halfway must not lose the bytes its earlier steps consumed.
    #[inline]
    pub fn or_rewind(self, input: &Bytes) -> Self {
        match self.value {
            Some(_) => self,
            None => Scan::pending(input.clone()),
        }
    }
}

/// Bounded scan for `sep`.
///
/// Only the first `max_len` bytes are considered as the token, plus the separator itself. If the
/// separator is found, returns the bytes before it as the value, and the bytes after the token
/// as remaining, with or without the separator according to `drop_sep`.
///
/// If the separator is not found, returns pending while the input is still too short to rule out
/// a separator within bound.
///
/// # Errors
///
/// Returns [`ParseError::IllegalFormat`] if the separator cannot start within the first
/// `max_len` bytes.
pub fn take(input: &Bytes, sep: &[u8], max_len: usize, drop_sep: bool) -> Result<Scan<Bytes>, ParseError> {
    let bound = max_len.saturating_add(sep.len());
    let window = &input[..bound.min(input.len())];

    match memchr::memmem::find(window, sep) {
        Some(idx) => {
            let skip = if drop_sep { idx + sep.len() } else { idx };
            Ok(Scan::done(input.slice(..idx), input.slice(skip..)))
        }
        None if input.len() >= bound => Err(ParseError::IllegalFormat),
        None => Ok(Scan::pending(input.clone())),
    }
}
