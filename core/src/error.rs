//! Error types for the sysport-core library.

use thiserror::Error;

/// Result type alias for sysport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during port discovery and process termination.
#[derive(Error, Debug)]
pub enum Error {
    /// A port argument was not a number.
    #[error("Invalid port '{0}' (must be a number)")]
    InvalidPort(String),

    /// A port argument was numeric but outside 1-65535.
    #[error("Port {0} out of range (must be 1-65535)")]
    PortOutOfRange(i64),

    /// The OS connection or process table could not be read.
    #[error("Failed to query listening sockets: {0}")]
    Query(String),

    /// No active listener on the requested port.
    #[error("port {0} is not listening")]
    NotListening(u16),

    /// A listener exists but no owning process could be identified.
    #[error("no process found for port {0}")]
    NoOwner(u16),

    /// The OS rejected a termination signal.
    #[error("failed to send {signal} to process {pid}: {reason}")]
    Signal {
        pid: u32,
        signal: &'static str,
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform not supported.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Coarse classification of [`Error`] so callers can branch on the kind
/// of failure instead of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Query,
    NotListening,
    NoOwner,
    Signal,
    Config,
    Io,
    Unsupported,
}

impl Error {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPort(_) | Error::PortOutOfRange(_) => ErrorKind::Validation,
            Error::Query(_) => ErrorKind::Query,
            Error::NotListening(_) => ErrorKind::NotListening,
            Error::NoOwner(_) => ErrorKind::NoOwner,
            Error::Signal { .. } => ErrorKind::Signal,
            Error::Config(_) | Error::Json(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::UnsupportedPlatform(_) => ErrorKind::Unsupported,
        }
    }
}
