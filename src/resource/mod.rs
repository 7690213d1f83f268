pub mod file;
pub mod memory;
pub mod scan;

pub use file::FileResource;
pub use memory::MemoryResource;
pub use scan::{
    is_whitespace, scan_from_last_whitespace_to_end, scan_to_next_whitespace_or_end, TailToken,
};

use crate::error::{Error, Result};
use crate::types::Offset;

/// Bytes returned by [`ByteResource::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadChunk {
    pub bytes: Vec<u8>,
    /// True when the requested span reached or passed the end of the resource.
    pub at_eof: bool,
}

/// Window sizes for the doubling boundary scans.
///
/// A scan starts with `initial` bytes and doubles until it either finds
/// a delimiter, exhausts the resource, or would need more than `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub initial: usize,
    pub max: usize,
}

impl ScanLimits {
    pub const DEFAULT_INITIAL: usize = 128;
    pub const DEFAULT_MAX: usize = 1_000_000;

    /// Start at `initial` bytes, never read more than `max`.
    pub fn new(initial: usize, max: usize) -> Self {
        ScanLimits { initial, max }
    }

    /// A single read of exactly `limit` bytes, no growth.
    pub fn fixed(limit: usize) -> Self {
        ScanLimits {
            initial: limit,
            max: limit,
        }
    }

    /// First window size, never zero and never above `max`.
    pub(crate) fn first_window(&self) -> usize {
        self.initial.max(1).min(self.max.max(1))
    }

    /// Doubled window, or `None` once `current` already reached `max`.
    pub(crate) fn grow(&self, current: usize) -> Option<usize> {
        if current >= self.max {
            None
        } else {
            Some(current.saturating_mul(2).min(self.max))
        }
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        ScanLimits {
            initial: Self::DEFAULT_INITIAL,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Seek-addressed bytes: the only I/O surface pellets need.
///
/// Implementations must report `length()` fresh on every call. Readers
/// are expected to touch only ranges a writer has fully committed.
pub trait ByteResource {
    /// Number of bytes currently committed.
    fn length(&self) -> Result<u64>;

    /// Read `len` bytes starting at `start`.
    ///
    /// Fails with [`Error::OutOfRange`] if `start > length()`. When `strict`
    /// is set, a span running past the end fails with [`Error::Truncated`];
    /// otherwise the available prefix is returned with `at_eof` set.
    fn read(&self, start: Offset, len: usize, strict: bool) -> Result<ReadChunk>;

    /// Append bytes at the end, returning the offset they start at.
    fn append(&mut self, _bytes: &[u8]) -> Result<Offset> {
        Err(Error::ReadOnly)
    }
}

/// Borrowed buffers are read-only resources. The codec scans them directly.
impl ByteResource for [u8] {
    fn length(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }

    fn read(&self, start: Offset, len: usize, strict: bool) -> Result<ReadChunk> {
        read_slice(self, start, len, strict)
    }
}

/// Shared range logic for anything backed by a contiguous slice.
pub(crate) fn read_slice(data: &[u8], start: Offset, len: usize, strict: bool) -> Result<ReadChunk> {
    let length = data.len() as u64;
    if start > length {
        return Err(Error::OutOfRange { start, length });
    }
    let end = start.saturating_add(len as u64);
    if strict && end > length {
        return Err(Error::Truncated {
            start,
            requested: len,
            available: length - start,
        });
    }
    let stop = end.min(length);
    Ok(ReadChunk {
        bytes: data[start as usize..stop as usize].to_vec(),
        at_eof: end >= length,
    })
}
