use std::io;

use thiserror::Error;

/// Unified error type for resources, scans and the pellet codec.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error from the backing file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A read started past the current end of the resource.
    #[error("read start {start} is past end of resource (length {length})")]
    OutOfRange { start: u64, length: u64 },

    /// A strict read could not be satisfied in full.
    #[error("strict read of {requested} bytes at {start} truncated: only {available} available")]
    Truncated {
        start: u64,
        requested: usize,
        available: u64,
    },

    /// Append attempted on a resource that was not opened writeable.
    #[error("resource is read only")]
    ReadOnly,

    /// Malformed pellet bytes: bad indicator, length, delimiter or offsets.
    #[error("format error: {0}")]
    Format(String),

    /// A boundary scan grew its window to the limit without finding whitespace.
    #[error("no whitespace boundary found within {limit} bytes")]
    BoundNotFound { limit: usize },
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
