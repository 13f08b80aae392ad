//! Server configuration.
//!
//! [`ParsingConfig`] bounds every field the HTTP/1 parsers accept, [`VHostConfig`] describes a
//! single listening virtual host, and [`Settings`] groups both.
//!
//! With the `config` feature, [`Settings`] can be deserialized from TOML:
//!
//! ```toml
//! terminate-timeout = 10
//!
//! [parsing]
//! header-name-length = 256
//! header-value-length = 8192
//!
//! [[vhosts]]
//! host = "127.0.0.1"
//! port = 8080
//! ```
use std::time::Duration;

#[cfg(feature = "config")]
use serde::Deserialize;

// ===== ParsingConfig =====

/// Maximum length of every bounded field of an HTTP/1 request.
///
/// Exceeding any bound is a structural error, not a truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize), serde(default, rename_all = "kebab-case"))]
pub struct ParsingConfig {
    header_name_length: usize,
    header_value_length: usize,
    method_length: usize,
    uri_length: usize,
    protocol_length: usize,
}

impl ParsingConfig {
    pub const DEFAULT_HEADER_NAME_LENGTH: usize = 256;
    pub const DEFAULT_HEADER_VALUE_LENGTH: usize = 8192;
    pub const DEFAULT_METHOD_LENGTH: usize = 16;
    pub const DEFAULT_URI_LENGTH: usize = 8192;
    pub const DEFAULT_PROTOCOL_LENGTH: usize = 16;

    #[inline]
    pub const fn new(
        header_name_length: usize,
        header_value_length: usize,
        method_length: usize,
        uri_length: usize,
        protocol_length: usize,
    ) -> Self {
        Self {
            header_name_length,
            header_value_length,
            method_length,
            uri_length,
            protocol_length,
        }
    }

    #[inline]
    pub const fn header_name_length(&self) -> usize {
        self.header_name_length
    }

    #[inline]
    pub const fn header_value_length(&self) -> usize {
        self.header_value_length
    }

    #[inline]
    pub const fn method_length(&self) -> usize {
        self.method_length
    }

    #[inline]
    pub const fn uri_length(&self) -> usize {
        self.uri_length
    }

    #[inline]
    pub const fn protocol_length(&self) -> usize {
        self.protocol_length
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_HEADER_NAME_LENGTH,
            Self::DEFAULT_HEADER_VALUE_LENGTH,
            Self::DEFAULT_METHOD_LENGTH,
            Self::DEFAULT_URI_LENGTH,
            Self::DEFAULT_PROTOCOL_LENGTH,
        )
    }
}

// ===== VHostConfig =====

/// A listening virtual host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize), serde(rename_all = "kebab-case"))]
pub struct VHostConfig {
    host: String,
    port: u16,
    /// Worker threads of a dedicated runtime, `None` to share the caller's runtime.
    #[cfg_attr(feature = "config", serde(default))]
    workers: Option<usize>,
    /// Capacity, in chunks, of a streaming entity channel.
    #[cfg_attr(feature = "config", serde(default = "default_entity_buffer"))]
    entity_buffer: usize,
}

const fn default_entity_buffer() -> usize {
    crate::body::DEFAULT_CHANNEL_CAPACITY
}

impl VHostConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: None,
            entity_buffer: default_entity_buffer(),
        }
    }

    /// Run this host on a dedicated runtime with `workers` threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_entity_buffer(mut self, entity_buffer: usize) -> Self {
        self.entity_buffer = entity_buffer;
        self
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[inline]
    pub const fn workers(&self) -> Option<usize> {
        self.workers
    }

    #[inline]
    pub const fn entity_buffer(&self) -> usize {
        self.entity_buffer
    }

    /// Returns `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ===== Settings =====

/// Process wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize), serde(default, rename_all = "kebab-case"))]
pub struct Settings {
    parsing: ParsingConfig,
    vhosts: Vec<VHostConfig>,
    /// Graceful shutdown limit, in seconds.
    terminate_timeout: u64,
}

impl Settings {
    pub const DEFAULT_TERMINATE_TIMEOUT: u64 = 10;

    pub fn new(parsing: ParsingConfig, vhosts: Vec<VHostConfig>) -> Self {
        Self {
            parsing,
            vhosts,
            terminate_timeout: Self::DEFAULT_TERMINATE_TIMEOUT,
        }
    }

    pub fn with_terminate_timeout(mut self, secs: u64) -> Self {
        self.terminate_timeout = secs;
        self
    }

    #[inline]
    pub const fn parsing(&self) -> &ParsingConfig {
        &self.parsing
    }

    #[inline]
    pub fn vhosts(&self) -> &[VHostConfig] {
        &self.vhosts
    }

    #[inline]
    pub const fn terminate_timeout(&self) -> Duration {
        Duration::from_secs(self.terminate_timeout)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(ParsingConfig::default(), vec![VHostConfig::new("127.0.0.1", 8080)])
    }
}

#[cfg(feature = "config")]
impl Settings {
    /// Parse settings from TOML source.
    ///
    /// Missing keys take their default value.
    pub fn from_toml(source: &str) -> Result<Settings, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    /// Read and parse settings from a TOML file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Settings, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&source)
    }
}

// ===== Error =====

/// Error loading [`Settings`].
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

#[cfg(feature = "config")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(feature = "config")]
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}
