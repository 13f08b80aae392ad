//! Logging shims.
//!
//! Without the `log` feature every macro expands to a discarded `format_args!`, so call sites
//! never need their own `#[cfg]` and bindings used only for logging stay used.
#![allow(unused, reason = "logger")]

macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!(target: "vhttp", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($tt)*); }
    };
}

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!(target: "vhttp", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($tt)*); }
    };
}

macro_rules! info {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::info!(target: "vhttp", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($tt)*); }
    };
}

macro_rules! warning {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::warn!(target: "vhttp", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($tt)*); }
    };
}

macro_rules! error {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::error!(target: "vhttp", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($tt)*); }
    };
}

pub(crate) use {debug, error, info, trace, warning};
